//! Bolton (1980) moist thermodynamics
//!
//! Closed-form approximations for saturation vapor pressure, mixing ratio,
//! lifted condensation level temperature and pseudo-equivalent potential
//! temperature. Every function is pure. Inputs outside the physical domain
//! return a [`DomainError`] rather than a `NaN`.
//!
//! Units are fixed by the argument types: `Celsius` where the equation is
//! written in degrees Celsius (sounding data, eq. 10), `Kelvin` where it needs
//! absolute temperature (eq. 22, Poisson's equation).
//!
//! # Scientific References
//! - Bolton, D. (1980). "The computation of equivalent potential temperature."
//!   Monthly Weather Review, 108(7), 1046-1053

use crate::core_types::units::{
    Celsius, Kelvin, Millibars, MixingRatio, Percent, CELSIUS_KELVIN_OFFSET,
};
use crate::error::DomainError;

/// Ratio of gas constants for dry air and water vapor (Rd/Rv)
pub const EPSILON: f64 = 0.622;

/// Poisson exponent for dry air (Rd/cp)
pub const K_DRY: f64 = 0.2854;

/// Bolton eq. 10 coefficients: e_s = A·exp(B·T / (T + C))
pub const SVP_A: f64 = 6.112;
pub const SVP_B: f64 = 17.67;
pub const SVP_C: f64 = 243.5;

/// Temperatures (°C) over which eq. 10 is trusted; callers keep meshes inside
pub const SVP_VALID_RANGE_C: (f64, f64) = (-80.0, 50.0);

/// Bolton eq. 22 offset (K)
const LCL_OFFSET: f64 = 55.0;

/// Bolton eq. 22 humidity divisor
const LCL_RH_DIVISOR: f64 = 2840.0;

fn require_positive(quantity: &'static str, value: f64) -> Result<(), DomainError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DomainError::NonPositive { quantity, value })
    }
}

/// Saturation vapor pressure over liquid water (Bolton eq. 10)
///
/// ```text
/// e_s = 6.112 × exp(17.67 T / (T + 243.5))
/// ```
///
/// Valid over [`SVP_VALID_RANGE_C`]. No bounds check: callers sample within
/// that range.
pub fn saturation_vapor_pressure(temperature: Celsius) -> Millibars {
    let t = *temperature;
    Millibars::new(SVP_A * ((SVP_B * t) / (t + SVP_C)).exp())
}

/// Temperature at which `vapor_pressure` is the saturation value (Bolton eq. 11)
///
/// ```text
/// T = (243.5 ln e_s − 440.8) / (19.48 − ln e_s)
/// ```
///
/// 440.8 and 19.48 are Bolton's rounding of `C·ln A` and `B + ln A`. They are
/// evaluated from the eq. 10 coefficients here so that this function inverts
/// [`saturation_vapor_pressure`] exactly.
///
/// # Errors
/// `NonPositive` when `e_s <= 0`; `Singularity` when the denominator vanishes.
pub fn saturation_vapor_temperature(vapor_pressure: Millibars) -> Result<Celsius, DomainError> {
    require_positive("vapor pressure", *vapor_pressure)?;

    let ln_a = SVP_A.ln();
    let ln_e = vapor_pressure.ln();
    let denominator = SVP_B + ln_a - ln_e;
    // Machine epsilon relative to the magnitude of the cancelling terms
    if denominator.abs() <= 4.0 * f64::EPSILON * (SVP_B + ln_a) {
        return Err(DomainError::Singularity {
            formula: "saturation vapor temperature",
            value: *vapor_pressure,
        });
    }

    let t = (SVP_C * ln_e - SVP_C * ln_a) / denominator;
    Celsius::try_new(t).ok_or(DomainError::BelowAbsoluteZero {
        value: t + CELSIUS_KELVIN_OFFSET,
    })
}

/// Saturation mixing ratio (kg/kg)
///
/// ```text
/// w_s = ε e_s / (p − e_s)
/// ```
///
/// # Errors
/// `NonPositive` for `p <= 0`; `SupersaturatedPressure` when `p <= e_s`.
pub fn saturation_mixing_ratio(
    pressure: Millibars,
    temperature: Celsius,
) -> Result<MixingRatio, DomainError> {
    require_positive("pressure", *pressure)?;
    let vapor_pressure = saturation_vapor_pressure(temperature);
    if *pressure <= *vapor_pressure {
        return Err(DomainError::SupersaturatedPressure {
            pressure_mb: *pressure,
            vapor_pressure_mb: *vapor_pressure,
        });
    }
    Ok(MixingRatio::new(
        EPSILON * *vapor_pressure / (*pressure - *vapor_pressure),
    ))
}

/// Temperature of the constant saturation-mixing-ratio isopleth at `pressure`
///
/// Inverts the mixing ratio relation to a vapor pressure,
/// `e = w p / (ε + w)`, then applies [`saturation_vapor_temperature`].
///
/// # Errors
/// `NonPositive` for a non-positive pressure or mixing ratio.
pub fn mixing_ratio_isopleth_temperature(
    pressure: Millibars,
    mixing_ratio: MixingRatio,
) -> Result<Celsius, DomainError> {
    require_positive("pressure", *pressure)?;
    require_positive("mixing ratio", *mixing_ratio)?;

    let w = *mixing_ratio;
    let vapor_pressure = Millibars::new(w * *pressure / (EPSILON + w));
    saturation_vapor_temperature(vapor_pressure)
}

/// Relative humidity (%) of air with mixing ratio `mixing_ratio`
///
/// ```text
/// RH = 100 × w / w_s(p, T)
/// ```
///
/// # Errors
/// `NonPositive`-style failure for a negative or non-finite mixing ratio, and
/// anything [`saturation_mixing_ratio`] rejects.
pub fn relative_humidity(
    temperature: Celsius,
    pressure: Millibars,
    mixing_ratio: MixingRatio,
) -> Result<Percent, DomainError> {
    if !mixing_ratio.is_finite() || *mixing_ratio < 0.0 {
        return Err(DomainError::NonPositive {
            quantity: "mixing ratio",
            value: *mixing_ratio,
        });
    }
    let saturation = saturation_mixing_ratio(pressure, temperature)?;
    // Ratio first so w == w_s gives exactly 100
    Ok(Percent::new(100.0 * (*mixing_ratio / *saturation)))
}

/// Temperature at the lifted condensation level (Bolton eq. 22)
///
/// ```text
/// T_L = 1 / (1/(T − 55) − ln(RH/100)/2840) + 55
/// ```
///
/// # Arguments
/// * `temperature` - Parcel temperature (K)
/// * `relative_humidity` - Parcel relative humidity, (0, 100] %
///
/// # Errors
/// `OutOfRange` for RH outside (0, 100]; `Singularity` at T = 55 K or where
/// the outer denominator vanishes.
pub fn lifted_condensation_level_temperature(
    temperature: Kelvin,
    relative_humidity: Percent,
) -> Result<Kelvin, DomainError> {
    let rh = *relative_humidity;
    if !rh.is_finite() || rh <= 0.0 || rh > 100.0 {
        return Err(DomainError::OutOfRange {
            quantity: "relative humidity",
            value: rh,
            min: 0.0,
            max: 100.0,
        });
    }

    let offset_temperature = *temperature - LCL_OFFSET;
    if offset_temperature.abs() <= f64::EPSILON {
        return Err(DomainError::Singularity {
            formula: "LCL temperature",
            value: *temperature,
        });
    }

    let denominator =
        1.0 / offset_temperature - relative_humidity.to_fraction().ln() / LCL_RH_DIVISOR;
    if denominator.abs() <= f64::EPSILON {
        return Err(DomainError::Singularity {
            formula: "LCL temperature",
            value: *temperature,
        });
    }

    let t_lcl = 1.0 / denominator + LCL_OFFSET;
    Kelvin::try_new(t_lcl).ok_or(DomainError::BelowAbsoluteZero { value: t_lcl })
}

/// Temperature on the dry adiabat `theta` at `pressure` (inverse Poisson equation)
///
/// ```text
/// T = θ / (p0/p)^k
/// ```
///
/// Used to draw dry adiabats: θ fixed, p varying. `T == θ` at `p == p0`.
///
/// # Errors
/// `NonPositive` for a non-positive `pressure` or `reference`.
pub fn dry_potential_temperature(
    theta: Kelvin,
    pressure: Millibars,
    reference: Millibars,
) -> Result<Kelvin, DomainError> {
    require_positive("pressure", *pressure)?;
    require_positive("reference pressure", *reference)?;
    Ok(Kelvin::new(*theta / (*reference / *pressure).powf(K_DRY)))
}

/// Potential temperature of air at `temperature` and `pressure` (Poisson equation)
///
/// ```text
/// θ = T (p0/p)^k
/// ```
///
/// # Errors
/// `NonPositive` for a non-positive `pressure` or `reference`.
pub fn potential_temperature(
    temperature: Kelvin,
    pressure: Millibars,
    reference: Millibars,
) -> Result<Kelvin, DomainError> {
    require_positive("pressure", *pressure)?;
    require_positive("reference pressure", *reference)?;
    Ok(Kelvin::new(*temperature * (*reference / *pressure).powf(K_DRY)))
}

/// Pseudo-equivalent potential temperature (Bolton eq. 43)
///
/// ```text
/// θ_ep = T_K (p0/p)^(k(1 − 0.28e-3 r)) × exp((3.376/T_L − 0.00254) × r(1 + 0.81e-3 r))
/// ```
///
/// with `r` the mixing ratio in g/kg and `T_L` the LCL temperature from
/// eq. 22 evaluated at the parcel's relative humidity.
///
/// # Arguments
/// * `temperature` - Parcel temperature (°C)
/// * `pressure` - Parcel pressure (mb)
/// * `mixing_ratio` - Parcel mixing ratio (kg/kg)
/// * `reference` - Reference pressure p0 (mb)
///
/// # Errors
/// Propagates failures from [`relative_humidity`] and
/// [`lifted_condensation_level_temperature`] (e.g. supersaturated or dry air).
pub fn pseudo_equivalent_potential_temperature(
    temperature: Celsius,
    pressure: Millibars,
    mixing_ratio: MixingRatio,
    reference: Millibars,
) -> Result<Kelvin, DomainError> {
    require_positive("reference pressure", *reference)?;

    let humidity = relative_humidity(temperature, pressure, mixing_ratio)?;
    let t_kelvin = temperature.to_kelvin();
    let t_lcl = lifted_condensation_level_temperature(t_kelvin, humidity)?;
    let r = mixing_ratio.to_grams_per_kg();

    let dry_factor = (*reference / *pressure).powf(K_DRY * (1.0 - 0.28e-3 * r));
    let moist_factor = ((3.376 / *t_lcl - 0.00254) * r * (1.0 + 0.81e-3 * r)).exp();
    let theta_ep = *t_kelvin * dry_factor * moist_factor;

    Kelvin::try_new(theta_ep).ok_or(DomainError::BelowAbsoluteZero { value: theta_ep })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn vapor_pressure_at_20c() {
        let e_s = saturation_vapor_pressure(Celsius::new(20.0));
        assert!(
            (*e_s - 23.37).abs() <= 0.05,
            "e_s(20°C) should be ~23.37 mb, got {e_s}"
        );
    }

    #[test]
    fn vapor_pressure_at_freezing() {
        let e_s = saturation_vapor_pressure(Celsius::FREEZING);
        assert_relative_eq!(*e_s, SVP_A, epsilon = 1e-12);
    }

    #[test]
    fn vapor_temperature_inverts_vapor_pressure() {
        for t in (-80..=50).map(f64::from) {
            let e_s = saturation_vapor_pressure(Celsius::new(t));
            let back = saturation_vapor_temperature(e_s).unwrap();
            assert!(
                (*back - t).abs() < 1e-6,
                "round trip at {t}°C returned {back}"
            );
        }
    }

    #[test]
    fn vapor_temperature_rejects_non_positive() {
        assert!(matches!(
            saturation_vapor_temperature(Millibars::new(0.0)),
            Err(DomainError::NonPositive { .. })
        ));
        assert!(saturation_vapor_temperature(Millibars::new(-3.0)).is_err());
    }

    #[test]
    fn vapor_temperature_rejects_singularity() {
        let pole = Millibars::new((SVP_B + SVP_A.ln()).exp());
        assert!(matches!(
            saturation_vapor_temperature(pole),
            Err(DomainError::Singularity { .. })
        ));
    }

    #[test]
    fn vapor_pressure_strictly_increasing() {
        let mut previous = saturation_vapor_pressure(Celsius::new(-80.0));
        for tenth in -799..=500 {
            let current = saturation_vapor_pressure(Celsius::new(f64::from(tenth) / 10.0));
            assert!(current > previous);
            previous = current;
        }
    }

    #[test]
    fn mixing_ratio_monotonic_in_t_and_p() {
        let p = Millibars::new(850.0);
        let mut previous = saturation_mixing_ratio(p, Celsius::new(-40.0)).unwrap();
        for t in (-39..=30).map(f64::from) {
            let current = saturation_mixing_ratio(p, Celsius::new(t)).unwrap();
            assert!(current > previous, "w_s should increase with T at {t}°C");
            previous = current;
        }

        let t = Celsius::new(10.0);
        let mut previous = saturation_mixing_ratio(Millibars::new(200.0), t).unwrap();
        for p in (201..=1050).map(f64::from) {
            let current = saturation_mixing_ratio(Millibars::new(p), t).unwrap();
            assert!(current < previous, "w_s should decrease with p at {p} mb");
            previous = current;
        }
    }

    #[test]
    fn mixing_ratio_rejects_pressure_below_vapor_pressure() {
        // e_s(40°C) ≈ 73.8 mb
        assert!(matches!(
            saturation_mixing_ratio(Millibars::new(50.0), Celsius::new(40.0)),
            Err(DomainError::SupersaturatedPressure { .. })
        ));
        assert!(matches!(
            saturation_mixing_ratio(Millibars::new(0.0), Celsius::new(0.0)),
            Err(DomainError::NonPositive { .. })
        ));
    }

    #[test]
    fn isopleth_temperature_is_saturation_point() {
        let p = Millibars::new(900.0);
        let w = MixingRatio::from_grams_per_kg(8.0);
        let t = mixing_ratio_isopleth_temperature(p, w).unwrap();
        let w_back = saturation_mixing_ratio(p, t).unwrap();
        assert_relative_eq!(*w_back, *w, max_relative = 1e-9);
    }

    #[test]
    fn isopleth_rejects_zero_mixing_ratio() {
        let p = Millibars::new(900.0);
        assert!(mixing_ratio_isopleth_temperature(p, MixingRatio::new(0.0)).is_err());
        let w = MixingRatio::new(0.01);
        assert!(mixing_ratio_isopleth_temperature(Millibars::new(-1.0), w).is_err());
    }

    #[test]
    fn relative_humidity_at_saturation_is_100() {
        let p = Millibars::new(700.0);
        let t = Celsius::new(5.0);
        let w_s = saturation_mixing_ratio(p, t).unwrap();
        let rh = relative_humidity(t, p, w_s).unwrap();
        assert_relative_eq!(*rh, 100.0, epsilon = 1e-12);
    }

    #[test]
    fn relative_humidity_rejects_negative_mixing_ratio() {
        let result = relative_humidity(
            Celsius::new(5.0),
            Millibars::new(700.0),
            MixingRatio::new(-0.001),
        );
        assert!(result.is_err());
    }

    #[test]
    fn lcl_rejects_invalid_humidity() {
        let t = Kelvin::new(293.15);
        assert!(matches!(
            lifted_condensation_level_temperature(t, Percent::new(0.0)),
            Err(DomainError::OutOfRange { .. })
        ));
        assert!(matches!(
            lifted_condensation_level_temperature(t, Percent::new(101.0)),
            Err(DomainError::OutOfRange { .. })
        ));
    }

    #[test]
    fn lcl_rejects_offset_singularity() {
        assert!(matches!(
            lifted_condensation_level_temperature(Kelvin::new(55.0), Percent::new(50.0)),
            Err(DomainError::Singularity { .. })
        ));
    }

    #[test]
    fn lcl_equals_temperature_at_saturation() {
        let t = Kelvin::new(290.0);
        let t_lcl = lifted_condensation_level_temperature(t, Percent::SATURATED).unwrap();
        assert_relative_eq!(*t_lcl, 290.0, epsilon = 1e-9);
    }

    #[test]
    fn lcl_below_temperature_when_unsaturated() {
        let t = Kelvin::new(293.15);
        let t_lcl = lifted_condensation_level_temperature(t, Percent::new(50.0)).unwrap();
        assert!(*t_lcl < 293.15);
        assert!(*t_lcl > 270.0, "LCL temperature {t_lcl} unreasonably cold");
    }

    #[test]
    fn dry_adiabat_unchanged_at_reference() {
        for theta in [233.15, 273.15, 300.0, 373.15] {
            let t = dry_potential_temperature(
                Kelvin::new(theta),
                Millibars::REFERENCE,
                Millibars::REFERENCE,
            )
            .unwrap();
            assert_eq!(*t, theta);
        }
    }

    #[test]
    fn dry_adiabat_cools_with_height() {
        let theta = Kelvin::new(300.0);
        let t_500 =
            dry_potential_temperature(theta, Millibars::new(500.0), Millibars::REFERENCE).unwrap();
        assert_relative_eq!(*t_500, 300.0 / 2f64.powf(K_DRY), epsilon = 1e-9);
        assert!(*t_500 < 300.0);
    }

    #[test]
    fn potential_temperature_inverts_dry_adiabat() {
        let p = Millibars::new(650.0);
        let theta = Kelvin::new(310.0);
        let t = dry_potential_temperature(theta, p, Millibars::REFERENCE).unwrap();
        let back = potential_temperature(t, p, Millibars::REFERENCE).unwrap();
        assert_relative_eq!(*back, 310.0, epsilon = 1e-9);
    }

    #[test]
    fn dry_adiabat_rejects_non_positive_pressure() {
        let theta = Kelvin::new(300.0);
        assert!(dry_potential_temperature(theta, Millibars::new(0.0), Millibars::REFERENCE).is_err());
        assert!(dry_potential_temperature(theta, Millibars::new(500.0), Millibars::new(-1.0)).is_err());
    }

    #[test]
    fn theta_ep_known_value() {
        let theta_ep = pseudo_equivalent_potential_temperature(
            Celsius::new(20.0),
            Millibars::new(1000.0),
            MixingRatio::new(0.01),
            Millibars::REFERENCE,
        )
        .unwrap();
        assert!(
            (300.0..=340.0).contains(&*theta_ep),
            "θ_ep should be physically sane, got {theta_ep}"
        );
        // Hand evaluation of eq. 43 gives ≈ 321.9 K
        assert!((*theta_ep - 321.9).abs() < 0.5, "got {theta_ep}");
    }

    #[test]
    fn theta_ep_exceeds_theta_for_moist_air() {
        let t = Celsius::new(15.0);
        let p = Millibars::new(850.0);
        let w = MixingRatio::from_grams_per_kg(6.0);
        let theta = potential_temperature(t.to_kelvin(), p, Millibars::REFERENCE).unwrap();
        let theta_ep =
            pseudo_equivalent_potential_temperature(t, p, w, Millibars::REFERENCE).unwrap();
        assert!(theta_ep > theta);
    }

    #[test]
    fn theta_ep_rejects_dry_air() {
        // RH = 0 hits the LCL logarithm
        let result = pseudo_equivalent_potential_temperature(
            Celsius::new(20.0),
            Millibars::new(1000.0),
            MixingRatio::new(0.0),
            Millibars::REFERENCE,
        );
        assert!(matches!(result, Err(DomainError::OutOfRange { .. })));
    }
}
