//! Temperature and dewpoint traces of a sounding

use super::lines::PlotPoint;
use super::transform::SkewTransform;
use crate::core_types::units::Millibars;
use crate::error::{DomainError, ValidationError};
use crate::sounding::SoundingProfile;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Plotting-plane traces of the valid records of a sounding
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoundingTrace {
    /// Pressure of each plotted level
    pub pressures: Vec<Millibars>,
    /// Temperature trace, one point per valid record
    pub temperature: Vec<PlotPoint>,
    /// Dewpoint trace, aligned with `temperature`
    pub dewpoint: Vec<PlotPoint>,
    /// Records excluded by the range check
    pub rejected: Vec<ValidationError>,
}

impl SoundingTrace {
    #[must_use]
    pub fn len(&self) -> usize {
        self.temperature.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.temperature.is_empty()
    }
}

/// Project every valid record; invalid records are collected, not plotted
pub(crate) fn build(
    transform: &SkewTransform,
    profile: &SoundingProfile,
) -> Result<SoundingTrace, DomainError> {
    let (valid, rejected) = profile.valid_records();

    let mut trace = SoundingTrace {
        pressures: Vec::with_capacity(valid.len()),
        temperature: Vec::with_capacity(valid.len()),
        dewpoint: Vec::with_capacity(valid.len()),
        rejected,
    };

    for record in &valid {
        let (x_t, y) = transform.from_thermo(record.temperature, record.pressure)?;
        let (x_td, _) = transform.from_thermo(record.dewpoint, record.pressure)?;
        trace.pressures.push(record.pressure);
        trace.temperature.push(PlotPoint::new(x_t, y));
        trace.dewpoint.push(PlotPoint::new(x_td, y));
    }

    debug!(
        "Sounding trace: {} levels plotted, {} rejected",
        trace.len(),
        trace.rejected.len()
    );
    Ok(trace)
}
