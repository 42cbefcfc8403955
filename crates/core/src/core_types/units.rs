//! Semantic unit types for type-safe thermodynamic quantity handling
//!
//! This module provides newtype wrappers for the physical quantities that
//! flow through the Bolton formulas and the skew-T transform, so that a
//! Celsius value can never be handed to an equation that expects Kelvin
//! (or a g/kg mixing ratio to one that expects kg/kg).
//!
//! # Design Philosophy
//! - All types wrap f64; exp/ln chains in the formulas need the precision
//! - Implements common traits (Ord, Deref, Display, From, serde)
//! - Total ordering via Ord trait (NaN handled as greater than all values)
//! - Temperature constructors assert the absolute-zero bound
//! - Pressure and mixing ratio accept any value; the formulas that consume
//!   them report out-of-domain inputs as `DomainError`
//!
//! # Usage
//! ```
//! use skewt_core::core_types::units::{Celsius, Kelvin, MixingRatio};
//!
//! let temp = Celsius::new(25.0);
//! let kelvin: Kelvin = temp.into();
//! assert!((*kelvin - 298.15).abs() < 1e-9);
//!
//! let w = MixingRatio::from_grams_per_kg(8.0);
//! assert!((*w - 0.008).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;

/// Celsius to Kelvin conversion offset (0°C = 273.15 K)
pub const CELSIUS_KELVIN_OFFSET: f64 = 273.15;

// ============================================================================
// HELPER FUNCTIONS FOR TOTAL ORDERING
// ============================================================================

/// Compare f64 values with total ordering using Rust's built-in `total_cmp`
#[inline]
fn f64_total_cmp(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

/// Implements `Eq`, `Ord` and `Deref<Target = f64>` for a transparent f64 newtype
macro_rules! total_order_newtype {
    ($name:ident) => {
        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                f64_total_cmp(self.0, other.0)
            }
        }

        impl Deref for $name {
            type Target = f64;
            #[inline]
            fn deref(&self) -> &f64 {
                &self.0
            }
        }

        impl From<$name> for f64 {
            fn from(v: $name) -> f64 {
                v.0
            }
        }
    };
}

// ============================================================================
// TEMPERATURE TYPES
// ============================================================================

/// Temperature in degrees Celsius
///
/// Sounding data and surface measurements are reported in Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Celsius(f64);

total_order_newtype!(Celsius);

impl Celsius {
    /// Water freezing point
    pub const FREEZING: Celsius = Celsius(0.0);

    /// Create a new Celsius temperature. Asserts value >= absolute zero (-273.15°C).
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(
            value >= -CELSIUS_KELVIN_OFFSET,
            "Celsius::new: value is below absolute zero (-273.15°C)"
        );
        Celsius(value)
    }

    /// Checked constructor: `None` below absolute zero or for non-finite input
    #[inline]
    #[must_use]
    pub fn try_new(value: f64) -> Option<Self> {
        (value.is_finite() && value >= -CELSIUS_KELVIN_OFFSET).then_some(Celsius(value))
    }

    /// Convert to Kelvin
    #[inline]
    #[must_use]
    pub fn to_kelvin(self) -> Kelvin {
        Kelvin(self.0 + CELSIUS_KELVIN_OFFSET)
    }
}

impl From<Celsius> for Kelvin {
    fn from(c: Celsius) -> Kelvin {
        c.to_kelvin()
    }
}

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°C", self.0)
    }
}

/// Temperature in Kelvin (absolute scale)
///
/// Required by the Bolton equations that operate on absolute temperature
/// (LCL temperature, potential temperatures).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Kelvin(f64);

total_order_newtype!(Kelvin);

impl Kelvin {
    /// Create a new Kelvin temperature. Asserts value >= absolute zero (0 K).
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(value >= 0.0, "Kelvin::new: value is below absolute zero (0 K)");
        Kelvin(value)
    }

    /// Checked constructor: `None` below absolute zero or for non-finite input
    #[inline]
    #[must_use]
    pub fn try_new(value: f64) -> Option<Self> {
        (value.is_finite() && value >= 0.0).then_some(Kelvin(value))
    }

    /// Convert to Celsius
    #[inline]
    #[must_use]
    pub fn to_celsius(self) -> Celsius {
        Celsius(self.0 - CELSIUS_KELVIN_OFFSET)
    }
}

impl From<Kelvin> for Celsius {
    fn from(k: Kelvin) -> Celsius {
        k.to_celsius()
    }
}

impl fmt::Display for Kelvin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} K", self.0)
    }
}

// ============================================================================
// PRESSURE
// ============================================================================

/// Pressure in millibars (hectopascals)
///
/// Any value can be wrapped. Formulas reject non-positive pressures with a
/// `DomainError` instead of producing `NaN` from `ln`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Millibars(f64);

total_order_newtype!(Millibars);

impl Millibars {
    /// Reference pressure for potential temperature (p0)
    pub const REFERENCE: Millibars = Millibars(1000.0);

    /// Create a pressure value
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Millibars(value)
    }

    /// True when the pressure is finite and strictly positive
    #[inline]
    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

impl fmt::Display for Millibars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} mb", self.0)
    }
}

// ============================================================================
// MOISTURE
// ============================================================================

/// Mixing ratio in kilograms of water vapor per kilogram of dry air
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct MixingRatio(f64);

total_order_newtype!(MixingRatio);

impl MixingRatio {
    /// g/kg per kg/kg
    pub const GRAMS_PER_KILOGRAM: f64 = 1000.0;

    /// Create from kg/kg
    #[inline]
    #[must_use]
    pub const fn new(kg_per_kg: f64) -> Self {
        MixingRatio(kg_per_kg)
    }

    /// Create from g/kg (the unit diagrams label isopleths with)
    #[inline]
    #[must_use]
    pub fn from_grams_per_kg(g_per_kg: f64) -> Self {
        MixingRatio(g_per_kg / Self::GRAMS_PER_KILOGRAM)
    }

    /// Convert to g/kg
    #[inline]
    #[must_use]
    pub fn to_grams_per_kg(self) -> f64 {
        self.0 * Self::GRAMS_PER_KILOGRAM
    }
}

impl fmt::Display for MixingRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} g/kg", self.to_grams_per_kg())
    }
}

/// Percentage value (relative humidity)
///
/// Not range-checked on construction; the LCL formula enforces (0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Percent(f64);

total_order_newtype!(Percent);

impl Percent {
    /// Saturation
    pub const SATURATED: Percent = Percent(100.0);

    /// Create a percentage value
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Percent(value)
    }

    /// Convert to a 0-1 fraction
    #[inline]
    #[must_use]
    pub fn to_fraction(self) -> f64 {
        self.0 / 100.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

// ============================================================================
// DISTANCE
// ============================================================================

/// Altitude in meters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Meters(f64);

total_order_newtype!(Meters);

impl Meters {
    /// Create a new distance value
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Meters(value)
    }
}

impl fmt::Display for Meters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0} m", self.0)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_celsius_to_kelvin() {
        let c = Celsius(25.0);
        let k = c.to_kelvin();
        assert!((k.0 - 298.15).abs() < 1e-12);
    }

    #[test]
    fn test_kelvin_to_celsius() {
        let k = Kelvin(273.15);
        let c = k.to_celsius();
        assert!(c.0.abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "Celsius::new: value is below absolute zero")]
    fn test_celsius_new_panics_below_absolute_zero() {
        let _ = Celsius::new(-300.0);
    }

    #[test]
    #[should_panic(expected = "Kelvin::new: value is below absolute zero")]
    fn test_kelvin_new_panics_below_absolute_zero() {
        let _ = Kelvin::new(-1.0);
    }

    #[test]
    fn test_try_new_rejects_invalid() {
        assert!(Celsius::try_new(-9999.0).is_none());
        assert!(Celsius::try_new(f64::NAN).is_none());
        assert!(Kelvin::try_new(-0.5).is_none());
        assert_eq!(Kelvin::try_new(10.0), Some(Kelvin(10.0)));
    }

    #[test]
    fn test_mixing_ratio_gram_conversion() {
        let w = MixingRatio::from_grams_per_kg(12.0);
        assert!((w.0 - 0.012).abs() < 1e-15);
        assert!((w.to_grams_per_kg() - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_millibars_positive() {
        assert!(Millibars::new(850.0).is_positive());
        assert!(!Millibars::new(0.0).is_positive());
        assert!(!Millibars::new(f64::INFINITY).is_positive());
    }

    #[test]
    fn test_total_ordering() {
        let t1 = Celsius::new(-10.0);
        let t2 = Celsius::new(15.0);
        assert_eq!(t1.max(t2), t2);
        assert!(Millibars::new(500.0) < Millibars::new(850.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Celsius::new(20.0).to_string(), "20.0°C");
        assert_eq!(Millibars::new(850.0).to_string(), "850.0 mb");
        assert_eq!(MixingRatio::new(0.008).to_string(), "8.00 g/kg");
    }
}
