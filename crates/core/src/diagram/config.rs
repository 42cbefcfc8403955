//! Diagram configuration: reference levels and sampling resolution
//!
//! Defaults reproduce the classic Skew-T layout: 1050–150 mb sampled every
//! millibar, isobars every 50 mb, isotherms every 10°C from -80°C to 40°C,
//! dry and moist adiabats every 10°C from -40°C to 100°C, and the UCAR RAP
//! mixing ratio set.

use super::transform::{SkewTransform, DEFAULT_SKEW_SLOPE};
use crate::core_types::units::{Celsius, Kelvin, Millibars, MixingRatio};
use crate::error::{Result, SkewTError};
use crate::physics::bolton::SVP_VALID_RANGE_C;
use serde::{Deserialize, Serialize};

/// Mixing ratios (g/kg) labelled on UCAR RAP soundings
pub const RAP_MIXING_RATIOS_G_PER_KG: [f64; 9] = [0.4, 1.0, 2.0, 3.0, 5.0, 8.0, 12.0, 16.0, 20.0];

/// Evenly spaced values from `start` towards `stop` inclusive
fn stepped(start: i32, stop: i32, step: i32) -> impl Iterator<Item = f64> {
    let count = (stop - start) / step + 1;
    (0..count).map(move |i| f64::from(start + i * step))
}

/// Fixed sets of levels the diagram displays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramLevelSet {
    /// Isobars
    pub pressure_levels: Vec<Millibars>,
    /// Isotherms
    pub temperature_levels: Vec<Celsius>,
    /// Dry adiabats (θ)
    pub potential_temperature_levels: Vec<Kelvin>,
    /// Moist adiabats (θ_ep contour levels)
    pub equivalent_potential_temperature_levels: Vec<Kelvin>,
    /// Saturation mixing ratio isopleths (g/kg)
    pub mixing_ratios_g_per_kg: Vec<f64>,
}

impl Default for DiagramLevelSet {
    fn default() -> Self {
        let potential_temperature_levels: Vec<Kelvin> = stepped(-40, 100, 10)
            .map(|t| Celsius::new(t).to_kelvin())
            .collect();

        Self {
            pressure_levels: stepped(1000, 150, -50).map(Millibars::new).collect(),
            temperature_levels: stepped(-80, 40, 10).map(Celsius::new).collect(),
            equivalent_potential_temperature_levels: potential_temperature_levels.clone(),
            potential_temperature_levels,
            mixing_ratios_g_per_kg: RAP_MIXING_RATIOS_G_PER_KG.to_vec(),
        }
    }
}

impl DiagramLevelSet {
    /// Mixing ratio isopleths in kg/kg
    #[must_use]
    pub fn mixing_ratios(&self) -> Vec<MixingRatio> {
        self.mixing_ratios_g_per_kg
            .iter()
            .map(|&g| MixingRatio::from_grams_per_kg(g))
            .collect()
    }
}

/// Full diagram configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    /// Skew slope of the coordinate transform
    pub skew_slope: f64,
    /// Reference pressure p0 for potential temperatures
    pub reference_pressure: Millibars,
    /// Highest pressure sampled (bottom edge)
    pub p_bottom: Millibars,
    /// Lowest pressure sampled (top edge)
    pub p_top: Millibars,
    /// Pressure sampling interval (mb)
    pub pressure_step: f64,
    /// Temperature at the bottom-left corner
    pub t_axis_min: Celsius,
    /// Temperature at the bottom-right corner
    pub t_axis_max: Celsius,
    /// Mixing ratio isopleths are drawn only where p >= this value
    pub mixing_ratio_cutoff: Millibars,
    /// Coldest temperature of the moist adiabat mesh
    pub mesh_t_min: Celsius,
    /// Temperature spacing of the moist adiabat mesh (°C)
    pub mesh_t_step: f64,
    pub levels: DiagramLevelSet,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            skew_slope: DEFAULT_SKEW_SLOPE,
            reference_pressure: Millibars::REFERENCE,
            p_bottom: Millibars::new(1050.0),
            p_top: Millibars::new(150.0),
            pressure_step: 1.0,
            t_axis_min: Celsius::new(-40.0),
            t_axis_max: Celsius::new(50.0),
            mixing_ratio_cutoff: Millibars::new(600.0),
            mesh_t_min: Celsius::new(-60.0),
            mesh_t_step: 0.1,
            levels: DiagramLevelSet::default(),
        }
    }
}

impl DiagramConfig {
    pub fn with_skew_slope(mut self, skew_slope: f64) -> Self {
        self.skew_slope = skew_slope;
        self
    }

    pub fn with_reference_pressure(mut self, reference: Millibars) -> Self {
        self.reference_pressure = reference;
        self
    }

    pub fn with_pressure_range(mut self, bottom: Millibars, top: Millibars, step: f64) -> Self {
        self.p_bottom = bottom;
        self.p_top = top;
        self.pressure_step = step;
        self
    }

    pub fn with_mixing_ratio_cutoff(mut self, cutoff: Millibars) -> Self {
        self.mixing_ratio_cutoff = cutoff;
        self
    }

    pub fn with_mesh(mut self, t_min: Celsius, t_step: f64) -> Self {
        self.mesh_t_min = t_min;
        self.mesh_t_step = t_step;
        self
    }

    pub fn with_levels(mut self, levels: DiagramLevelSet) -> Self {
        self.levels = levels;
        self
    }

    /// Coordinate transform for this configuration
    #[must_use]
    pub fn transform(&self) -> SkewTransform {
        SkewTransform::new(self.skew_slope)
    }

    /// Warmest temperature of the moist adiabat mesh: the warmest isotherm
    ///
    /// Falls back to the axis maximum when no isotherms are configured.
    #[must_use]
    pub fn mesh_t_max(&self) -> Celsius {
        self.levels
            .temperature_levels
            .iter()
            .copied()
            .max()
            .unwrap_or(self.t_axis_max)
    }

    /// Check internal consistency
    ///
    /// # Errors
    /// `SkewTError::Config` describing the first inconsistency.
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, value: f64) -> Result<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(SkewTError::Config(format!(
                    "{name} must be positive and finite, got {value}"
                )))
            }
        }

        positive("skew_slope", self.skew_slope)?;
        positive("reference_pressure", *self.reference_pressure)?;
        positive("p_top", *self.p_top)?;
        positive("pressure_step", self.pressure_step)?;
        positive("mesh_t_step", self.mesh_t_step)?;

        if self.p_bottom <= self.p_top {
            return Err(SkewTError::Config(format!(
                "p_bottom ({}) must exceed p_top ({})",
                self.p_bottom, self.p_top
            )));
        }
        if self.t_axis_max <= self.t_axis_min {
            return Err(SkewTError::Config(format!(
                "t_axis_max ({}) must exceed t_axis_min ({})",
                self.t_axis_max, self.t_axis_min
            )));
        }
        let (svp_min, svp_max) = SVP_VALID_RANGE_C;
        for (name, bound) in [("mesh_t_min", self.mesh_t_min), ("mesh_t_max", self.mesh_t_max())] {
            if !(svp_min..=svp_max).contains(&*bound) {
                return Err(SkewTError::Config(format!(
                    "{name} ({}) is outside the vapor pressure formula's range [{svp_min}, {svp_max}] °C",
                    *bound
                )));
            }
        }
        if self.mesh_t_max() < self.mesh_t_min {
            return Err(SkewTError::Config(format!(
                "moist adiabat mesh is empty: {} to {}",
                self.mesh_t_min,
                self.mesh_t_max()
            )));
        }
        for level in &self.levels.pressure_levels {
            positive("pressure level", **level)?;
        }
        for &g in &self.levels.mixing_ratios_g_per_kg {
            positive("mixing ratio", g)?;
        }
        Ok(())
    }
}

/// `count` samples of `start + i·step`, with the count derived from the span
/// so accumulated rounding never drops the end point
pub(crate) fn sample_count(span: f64, step: f64) -> usize {
    (span / step + 1e-9).floor() as usize + 1
}
