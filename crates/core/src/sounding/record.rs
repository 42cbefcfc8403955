//! Sounding records and profiles
//!
//! A [`SoundingRecord`] is the raw form handed over by a profile reader: bare
//! numbers that may carry missing-value sentinels. Only records passing
//! [`SoundingRecord::validate`] are promoted to the typed [`ValidRecord`] and
//! used to derive plotting coordinates.

use crate::core_types::units::{Celsius, Kelvin, Meters, Millibars, MixingRatio, Percent};
use crate::error::{DomainError, RecordField, ValidationError};
use crate::physics::bolton;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Accepted open interval for temperature and dewpoint (°C)
pub const TEMPERATURE_RANGE_C: (f64, f64) = (-100.0, 60.0);

/// Accepted open interval for pressure (mb)
pub const PRESSURE_RANGE_MB: (f64, f64) = (0.0, 2000.0);

/// One raw sounding level as produced by a profile reader
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoundingRecord {
    /// Pressure (mb)
    pub pressure_mb: f64,
    /// Altitude (m)
    pub altitude_m: f64,
    /// Temperature (°C)
    pub temperature_c: f64,
    /// Dewpoint (°C)
    pub dewpoint_c: f64,
}

/// A sounding level that passed the physical range check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidRecord {
    /// Position in the originating profile
    pub index: usize,
    pub pressure: Millibars,
    pub altitude: Meters,
    pub temperature: Celsius,
    pub dewpoint: Celsius,
}

fn check_open_range(
    index: usize,
    field: RecordField,
    value: f64,
    (min, max): (f64, f64),
) -> Result<(), ValidationError> {
    // NaN fails both comparisons
    if value > min && value < max {
        Ok(())
    } else {
        Err(ValidationError {
            index,
            field,
            value,
            min,
            max,
        })
    }
}

impl SoundingRecord {
    /// Create a record from (pressure mb, altitude m, temperature °C, dewpoint °C)
    #[must_use]
    pub const fn new(pressure_mb: f64, altitude_m: f64, temperature_c: f64, dewpoint_c: f64) -> Self {
        Self {
            pressure_mb,
            altitude_m,
            temperature_c,
            dewpoint_c,
        }
    }

    /// Range-check this record
    ///
    /// Temperature and dewpoint must lie in (-100, 60) °C and pressure in
    /// (0, 2000) mb.
    ///
    /// # Errors
    /// The first field found out of range, reported with `index`.
    pub fn validate(&self, index: usize) -> Result<ValidRecord, ValidationError> {
        check_open_range(index, RecordField::Pressure, self.pressure_mb, PRESSURE_RANGE_MB)?;
        check_open_range(
            index,
            RecordField::Temperature,
            self.temperature_c,
            TEMPERATURE_RANGE_C,
        )?;
        check_open_range(index, RecordField::Dewpoint, self.dewpoint_c, TEMPERATURE_RANGE_C)?;

        Ok(ValidRecord {
            index,
            pressure: Millibars::new(self.pressure_mb),
            altitude: Meters::new(self.altitude_m),
            temperature: Celsius::new(self.temperature_c),
            dewpoint: Celsius::new(self.dewpoint_c),
        })
    }
}

/// Thermodynamic state derived for one valid sounding level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelDiagnostics {
    pub pressure: Millibars,
    pub altitude: Meters,
    pub temperature: Celsius,
    pub dewpoint: Celsius,
    /// Actual mixing ratio, the saturation value at the dewpoint
    pub mixing_ratio: MixingRatio,
    pub relative_humidity: Percent,
    pub lcl_temperature: Kelvin,
    pub potential_temperature: Kelvin,
    pub equivalent_potential_temperature: Kelvin,
}

impl ValidRecord {
    /// Derive moisture and stability quantities for this level
    ///
    /// # Errors
    /// A `DomainError` from the Bolton formulas, e.g. a dewpoint above the
    /// temperature (relative humidity over 100%).
    pub fn diagnostics(&self, reference: Millibars) -> Result<LevelDiagnostics, DomainError> {
        let mixing_ratio = bolton::saturation_mixing_ratio(self.pressure, self.dewpoint)?;
        let humidity = bolton::relative_humidity(self.temperature, self.pressure, mixing_ratio)?;
        let t_lcl =
            bolton::lifted_condensation_level_temperature(self.temperature.to_kelvin(), humidity)?;
        let theta =
            bolton::potential_temperature(self.temperature.to_kelvin(), self.pressure, reference)?;
        let theta_ep = bolton::pseudo_equivalent_potential_temperature(
            self.temperature,
            self.pressure,
            mixing_ratio,
            reference,
        )?;

        Ok(LevelDiagnostics {
            pressure: self.pressure,
            altitude: self.altitude,
            temperature: self.temperature,
            dewpoint: self.dewpoint,
            mixing_ratio,
            relative_humidity: humidity,
            lcl_temperature: t_lcl,
            potential_temperature: theta,
            equivalent_potential_temperature: theta_ep,
        })
    }
}

/// An ordered vertical profile: increasing altitude, decreasing pressure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoundingProfile {
    records: Vec<SoundingRecord>,
}

impl SoundingProfile {
    /// Wrap records in reader order
    #[must_use]
    pub fn new(records: Vec<SoundingRecord>) -> Self {
        Self { records }
    }

    /// All records, valid or not
    #[must_use]
    pub fn records(&self) -> &[SoundingRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Split records into those passing validation and the rejections
    ///
    /// Rejected records are logged and excluded; they never fail the profile.
    #[must_use]
    pub fn valid_records(&self) -> (Vec<ValidRecord>, Vec<ValidationError>) {
        let mut valid = Vec::with_capacity(self.records.len());
        let mut rejected = Vec::new();

        for (index, record) in self.records.iter().enumerate() {
            match record.validate(index) {
                Ok(v) => valid.push(v),
                Err(e) => {
                    warn!("Dropping sounding record: {e}");
                    rejected.push(e);
                }
            }
        }

        (valid, rejected)
    }

    /// Per-level diagnostics for every valid record
    ///
    /// # Errors
    /// The first `DomainError` raised by any valid level.
    pub fn diagnostics(&self, reference: Millibars) -> Result<Vec<LevelDiagnostics>, DomainError> {
        let (valid, _) = self.valid_records();
        valid.iter().map(|r| r.diagnostics(reference)).collect()
    }
}

impl FromIterator<SoundingRecord> for SoundingProfile {
    fn from_iter<I: IntoIterator<Item = SoundingRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic() -> SoundingProfile {
        SoundingProfile::new(vec![
            SoundingRecord::new(1000.0, 0.0, 20.0, 15.0),
            SoundingRecord::new(850.0, 1500.0, 10.0, 5.0),
            SoundingRecord::new(500.0, 5500.0, -15.0, -30.0),
        ])
    }

    #[test]
    fn synthetic_records_all_valid() {
        let (valid, rejected) = synthetic().valid_records();
        assert_eq!(valid.len(), 3);
        assert!(rejected.is_empty());
        assert_eq!(valid[1].index, 1);
        assert_eq!(valid[1].temperature, Celsius::new(10.0));
    }

    #[test]
    fn missing_value_sentinel_rejected() {
        let record = SoundingRecord::new(700.0, 3000.0, -9999.0, -9999.0);
        let err = record.validate(4).unwrap_err();
        assert_eq!(err.index, 4);
        assert_eq!(err.field, RecordField::Temperature);
    }

    #[test]
    fn range_bounds_are_exclusive() {
        assert!(SoundingRecord::new(2000.0, 0.0, 0.0, 0.0).validate(0).is_err());
        assert!(SoundingRecord::new(0.0, 0.0, 0.0, 0.0).validate(0).is_err());
        assert!(SoundingRecord::new(900.0, 0.0, 60.0, 0.0).validate(0).is_err());
        assert!(SoundingRecord::new(900.0, 0.0, 0.0, -100.0).validate(0).is_err());
        assert!(SoundingRecord::new(1999.9, 0.0, 59.9, -99.9).validate(0).is_ok());
    }

    #[test]
    fn nan_rejected() {
        let err = SoundingRecord::new(f64::NAN, 0.0, 0.0, 0.0)
            .validate(0)
            .unwrap_err();
        assert_eq!(err.field, RecordField::Pressure);
    }

    #[test]
    fn invalid_records_filtered_not_fatal() {
        let profile: SoundingProfile = [
            SoundingRecord::new(1000.0, 0.0, 20.0, 15.0),
            SoundingRecord::new(925.0, 700.0, 99.0, 10.0),
            SoundingRecord::new(850.0, 1500.0, 10.0, -9999.0),
            SoundingRecord::new(700.0, 3000.0, 0.0, -10.0),
        ]
        .into_iter()
        .collect();

        let (valid, rejected) = profile.valid_records();
        assert_eq!(valid.len(), 2);
        assert_eq!(rejected.len(), 2);
        assert_eq!(rejected[0].index, 1);
        assert_eq!(rejected[1].field, RecordField::Dewpoint);
    }

    #[test]
    fn diagnostics_for_synthetic_profile() {
        let levels = synthetic().diagnostics(Millibars::REFERENCE).unwrap();
        assert_eq!(levels.len(), 3);

        let surface = &levels[0];
        assert!(*surface.relative_humidity > 0.0 && *surface.relative_humidity < 100.0);
        assert!(surface.lcl_temperature < surface.temperature.to_kelvin());
        assert!(surface.equivalent_potential_temperature > surface.potential_temperature);
        // θ equals T at the reference pressure
        assert!((*surface.potential_temperature - 293.15).abs() < 1e-9);
    }

    #[test]
    fn diagnostics_reject_supersaturated_level() {
        let profile = SoundingProfile::new(vec![SoundingRecord::new(1000.0, 0.0, 10.0, 12.0)]);
        assert!(profile.diagnostics(Millibars::REFERENCE).is_err());
    }
}
