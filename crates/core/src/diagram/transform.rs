//! Skew-T log-p coordinate transform
//!
//! Maps a thermodynamic point (T, p) onto the plotting plane:
//!
//! ```text
//! x = T − s·ln p        y = −ln p
//! T = s·ln p + x        p = exp(−y)
//! ```
//!
//! where `s` is the skew slope. Isotherms lean right with height; isobars are
//! horizontal and logarithmically spaced.

use crate::core_types::units::{Celsius, Kelvin, Millibars};
use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Default skew of isotherms against the log-pressure axis
pub const DEFAULT_SKEW_SLOPE: f64 = 40.0;

/// Stateless bijection between (T, p) and plotting-plane (x, y)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkewTransform {
    /// Skew slope `s` in `x = T − s·ln p`
    pub skew_slope: f64,
}

impl Default for SkewTransform {
    fn default() -> Self {
        Self {
            skew_slope: DEFAULT_SKEW_SLOPE,
        }
    }
}

#[inline]
fn ln_pressure(pressure: Millibars) -> Result<f64, DomainError> {
    if pressure.is_positive() {
        Ok(pressure.ln())
    } else {
        Err(DomainError::NonPositive {
            quantity: "pressure",
            value: *pressure,
        })
    }
}

#[allow(
    clippy::wrong_self_convention,
    reason = "to_thermo/from_thermo name a coordinate pair, both borrow the transform"
)]
impl SkewTransform {
    #[must_use]
    pub const fn new(skew_slope: f64) -> Self {
        Self { skew_slope }
    }

    /// x(T, p) = T − s·ln p
    ///
    /// # Errors
    /// `NonPositive` for `p <= 0`.
    #[inline]
    pub fn x_from_tp(&self, temperature: Kelvin, pressure: Millibars) -> Result<f64, DomainError> {
        Ok(*temperature - self.skew_slope * ln_pressure(pressure)?)
    }

    /// y(p) = −ln p
    ///
    /// # Errors
    /// `NonPositive` for `p <= 0`.
    #[inline]
    #[allow(clippy::unused_self)]
    pub fn y_from_p(&self, pressure: Millibars) -> Result<f64, DomainError> {
        Ok(-ln_pressure(pressure)?)
    }

    /// T(x, p) = s·ln p + x, the inverse of [`Self::x_from_tp`] at fixed p
    ///
    /// # Errors
    /// `NonPositive` for `p <= 0`; `BelowAbsoluteZero` when (x, p) lies left of
    /// the 0 K isotherm.
    #[inline]
    pub fn t_from_xp(&self, x: f64, pressure: Millibars) -> Result<Kelvin, DomainError> {
        let t = self.skew_slope * ln_pressure(pressure)? + x;
        Kelvin::try_new(t).ok_or(DomainError::BelowAbsoluteZero { value: t })
    }

    /// p(y) = exp(−y), the inverse of [`Self::y_from_p`]
    #[inline]
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn p_from_y(&self, y: f64) -> Millibars {
        Millibars::new((-y).exp())
    }

    /// Plotting-plane point to (°C, mb)
    ///
    /// # Errors
    /// See [`Self::t_from_xp`].
    pub fn to_thermo(&self, x: f64, y: f64) -> Result<(Celsius, Millibars), DomainError> {
        let pressure = self.p_from_y(y);
        let temperature = self.t_from_xp(x, pressure)?;
        Ok((temperature.to_celsius(), pressure))
    }

    /// (°C, mb) to plotting-plane point, the inverse of [`Self::to_thermo`]
    ///
    /// # Errors
    /// `NonPositive` for `p <= 0`.
    pub fn from_thermo(
        &self,
        temperature: Celsius,
        pressure: Millibars,
    ) -> Result<(f64, f64), DomainError> {
        let y = self.y_from_p(pressure)?;
        let x = self.x_from_tp(temperature.to_kelvin(), pressure)?;
        Ok((x, y))
    }

    /// Cursor readout for a plotting-plane position, e.g. `" 12.3 C, 850.0 mb"`
    ///
    /// # Errors
    /// See [`Self::to_thermo`].
    pub fn readout(&self, x: f64, y: f64) -> Result<String, DomainError> {
        let (temperature, pressure) = self.to_thermo(x, y)?;
        Ok(format!("{:5.1} C, {:5.1} mb", *temperature, *pressure))
    }
}
