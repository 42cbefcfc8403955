//! Reference line families and the moist adiabat field
//!
//! [`AdiabatFieldGenerator`] samples pressure densely from the bottom to the
//! top of the diagram, evaluates the Bolton formulas along each configured
//! level and projects the results through the [`SkewTransform`]. Nothing is
//! cached between calls; each method recomputes its artifact in full.

use super::config::{sample_count, DiagramConfig};
use super::field::{self, MoistAdiabatField};
use super::lines::{AxisExtent, Isobar, PlotPoint, ReferenceLine};
use super::trace::{self, SoundingTrace};
use super::transform::SkewTransform;
use crate::core_types::units::{Celsius, Kelvin, Millibars, MixingRatio};
use crate::error::{DomainError, Result};
use crate::physics::bolton;
use crate::sounding::SoundingProfile;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Every artifact needed to draw one diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkewTDiagram {
    pub axis: AxisExtent,
    pub isobars: Vec<Isobar>,
    pub isotherms: Vec<ReferenceLine<Celsius>>,
    pub dry_adiabats: Vec<ReferenceLine<Kelvin>>,
    pub mixing_ratio_lines: Vec<ReferenceLine<MixingRatio>>,
    pub moist_adiabats: MoistAdiabatField,
    pub trace: SoundingTrace,
}

/// Builds line families and the θ_ep field for a [`DiagramConfig`]
#[derive(Debug, Clone)]
pub struct AdiabatFieldGenerator {
    config: DiagramConfig,
    transform: SkewTransform,
    /// `p_all`: bottom to top inclusive
    pressures: Vec<Millibars>,
    /// y of each entry in `pressures`
    pressure_y: Vec<f64>,
}

impl AdiabatFieldGenerator {
    /// Validate `config` and sample the pressure axis
    ///
    /// # Errors
    /// `SkewTError::Config` for an inconsistent configuration.
    pub fn new(config: DiagramConfig) -> Result<Self> {
        config.validate()?;
        let transform = config.transform();

        let step = config.pressure_step;
        let count = sample_count(*config.p_bottom - *config.p_top, step);
        let pressures: Vec<Millibars> = (0..count)
            .map(|i| Millibars::new(*config.p_bottom - i as f64 * step))
            .collect();
        let pressure_y = pressures
            .iter()
            .map(|&p| transform.y_from_p(p))
            .collect::<Result<Vec<_>, DomainError>>()?;

        debug!(
            "Pressure axis: {} samples from {} to {}",
            pressures.len(),
            config.p_bottom,
            config.p_top
        );

        Ok(Self {
            config,
            transform,
            pressures,
            pressure_y,
        })
    }

    #[must_use]
    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    #[must_use]
    pub fn transform(&self) -> &SkewTransform {
        &self.transform
    }

    /// The dense pressure sampling (`p_all`)
    #[must_use]
    pub fn pressure_samples(&self) -> &[Millibars] {
        &self.pressures
    }

    /// Project `temperature_at(p)` over every sampled pressure passing `keep`
    fn sampled_line<F, K>(&self, keep: K, temperature_at: F) -> Result<Vec<PlotPoint>, DomainError>
    where
        F: Fn(Millibars) -> Result<Kelvin, DomainError>,
        K: Fn(Millibars) -> bool,
    {
        self.pressures
            .iter()
            .zip(&self.pressure_y)
            .filter(|(p, _)| keep(**p))
            .map(|(&p, &y)| {
                let x = self.transform.x_from_tp(temperature_at(p)?, p)?;
                Ok(PlotPoint::new(x, y))
            })
            .collect()
    }

    /// Bounds of the plotted area
    ///
    /// # Errors
    /// Only on a configuration that bypassed validation.
    pub fn axis_extent(&self) -> Result<AxisExtent, DomainError> {
        let bottom = self.config.p_bottom;
        Ok(AxisExtent {
            x_min: self.transform.x_from_tp(self.config.t_axis_min.to_kelvin(), bottom)?,
            x_max: self.transform.x_from_tp(self.config.t_axis_max.to_kelvin(), bottom)?,
            y_min: self.transform.y_from_p(bottom)?,
            y_max: self.transform.y_from_p(self.config.p_top)?,
        })
    }

    /// Horizontal isobars at each configured pressure level
    ///
    /// # Errors
    /// `NonPositive` for a non-positive pressure level.
    pub fn isobars(&self) -> Result<Vec<Isobar>, DomainError> {
        let axis = self.axis_extent()?;
        self.config
            .levels
            .pressure_levels
            .iter()
            .map(|&pressure| {
                let y = self.transform.y_from_p(pressure)?;
                Ok(Isobar {
                    pressure,
                    y,
                    segment: [PlotPoint::new(axis.x_min, y), PlotPoint::new(axis.x_max, y)],
                })
            })
            .collect()
    }

    /// Isotherms: x(T_level, p) over the pressure samples
    ///
    /// # Errors
    /// Propagates transform domain errors.
    pub fn isotherms(&self) -> Result<Vec<ReferenceLine<Celsius>>, DomainError> {
        self.config
            .levels
            .temperature_levels
            .iter()
            .map(|&level| {
                let kelvin = level.to_kelvin();
                let points = self.sampled_line(|_| true, |_| Ok(kelvin))?;
                Ok(ReferenceLine { level, points })
            })
            .collect()
    }

    /// Dry adiabats: x(T(θ, p), p) over the pressure samples
    ///
    /// # Errors
    /// Propagates Poisson equation and transform domain errors.
    pub fn dry_adiabats(&self) -> Result<Vec<ReferenceLine<Kelvin>>, DomainError> {
        let reference = self.config.reference_pressure;
        self.config
            .levels
            .potential_temperature_levels
            .iter()
            .map(|&theta| {
                let points = self.sampled_line(
                    |_| true,
                    |p| bolton::dry_potential_temperature(theta, p, reference),
                )?;
                Ok(ReferenceLine {
                    level: theta,
                    points,
                })
            })
            .collect()
    }

    /// Saturation mixing ratio isopleths, drawn only where p >= the cutoff
    ///
    /// # Errors
    /// Propagates isopleth and transform domain errors.
    pub fn mixing_ratio_lines(&self) -> Result<Vec<ReferenceLine<MixingRatio>>, DomainError> {
        let cutoff = self.config.mixing_ratio_cutoff;
        self.config
            .levels
            .mixing_ratios()
            .into_iter()
            .map(|w| {
                let points = self.sampled_line(
                    |p| p >= cutoff,
                    |p| Ok(bolton::mixing_ratio_isopleth_temperature(p, w)?.to_kelvin()),
                )?;
                Ok(ReferenceLine { level: w, points })
            })
            .collect()
    }

    /// Mesh temperatures from `mesh_t_min` to the warmest isotherm
    #[must_use]
    pub fn mesh_temperatures(&self) -> Vec<Celsius> {
        let t_min = *self.config.mesh_t_min;
        let step = self.config.mesh_t_step;
        let count = sample_count(*self.config.mesh_t_max() - t_min, step);
        (0..count)
            .map(|i| Celsius::new(t_min + i as f64 * step))
            .collect()
    }

    /// θ_ep of saturated air over mesh temperatures × pressure samples
    ///
    /// # Errors
    /// The first domain error of any mesh point, e.g. a mesh reaching
    /// temperatures whose vapor pressure exceeds the top pressure.
    pub fn moist_adiabat_field(&self) -> Result<MoistAdiabatField, DomainError> {
        field::evaluate(
            &self.transform,
            self.mesh_temperatures(),
            &self.pressures,
            self.config.reference_pressure,
            self.config
                .levels
                .equivalent_potential_temperature_levels
                .clone(),
        )
    }

    /// Temperature and dewpoint traces of `profile`
    ///
    /// # Errors
    /// Propagates transform domain errors. Out-of-range records are dropped
    /// and listed in [`SoundingTrace::rejected`].
    pub fn sounding_trace(&self, profile: &SoundingProfile) -> Result<SoundingTrace, DomainError> {
        trace::build(&self.transform, profile)
    }

    /// Build every artifact of the diagram
    ///
    /// # Errors
    /// Any `DomainError` from the line families or field.
    pub fn generate(&self, profile: &SoundingProfile) -> Result<SkewTDiagram> {
        let diagram = SkewTDiagram {
            axis: self.axis_extent()?,
            isobars: self.isobars()?,
            isotherms: self.isotherms()?,
            dry_adiabats: self.dry_adiabats()?,
            mixing_ratio_lines: self.mixing_ratio_lines()?,
            moist_adiabats: self.moist_adiabat_field()?,
            trace: self.sounding_trace(profile)?,
        };

        let (rows, cols) = diagram.moist_adiabats.shape();
        info!(
            "Generated skew-T diagram: {} isobars, {} isotherms, {} dry adiabats, {} mixing ratio lines, {rows}×{cols} θ_ep mesh, {} sounding levels",
            diagram.isobars.len(),
            diagram.isotherms.len(),
            diagram.dry_adiabats.len(),
            diagram.mixing_ratio_lines.len(),
            diagram.trace.len()
        );
        Ok(diagram)
    }
}
