//! Moist adiabat field
//!
//! θ_ep evaluated at saturation over a temperature × pressure mesh. Moist
//! adiabats are the contours of this field at the configured θ_ep levels;
//! contour extraction itself is left to the renderer.
//!
//! Matrices are laid out like a numpy meshgrid: row `i` is `pressures[i]`,
//! column `j` is `temperatures[j]`.

use super::transform::SkewTransform;
use crate::core_types::units::{Celsius, Kelvin, Millibars};
use crate::error::DomainError;
use crate::physics::bolton;
use nalgebra::DMatrix;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// θ_ep over the mesh, plus the mesh in both coordinate systems
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoistAdiabatField {
    /// Mesh temperatures (columns)
    pub temperatures: Vec<Celsius>,
    /// Mesh pressures (rows)
    pub pressures: Vec<Millibars>,
    /// Pseudo-equivalent potential temperature (K)
    pub theta_ep: DMatrix<f64>,
    /// Plotting-plane x of every mesh point
    pub x: DMatrix<f64>,
    /// Plotting-plane y of every mesh point
    pub y: DMatrix<f64>,
    /// θ_ep values to contour
    pub levels: Vec<Kelvin>,
}

impl MoistAdiabatField {
    /// (rows, columns) = (pressures, temperatures)
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.theta_ep.shape()
    }

    /// θ_ep at mesh row `i` (pressure) and column `j` (temperature)
    #[must_use]
    pub fn value_at(&self, i: usize, j: usize) -> Option<Kelvin> {
        self.theta_ep.get((i, j)).copied().map(Kelvin::new)
    }
}

/// θ_ep of saturated air at (T, p)
#[inline]
fn saturated_theta_ep(
    temperature: Celsius,
    pressure: Millibars,
    reference: Millibars,
) -> Result<Kelvin, DomainError> {
    let w_s = bolton::saturation_mixing_ratio(pressure, temperature)?;
    bolton::pseudo_equivalent_potential_temperature(temperature, pressure, w_s, reference)
}

/// Evaluate the field over `temperatures` × `pressures`
///
/// Rows are evaluated in parallel. Any domain error aborts the whole field;
/// no point is ever filled with `NaN`.
pub(crate) fn evaluate(
    transform: &SkewTransform,
    temperatures: Vec<Celsius>,
    pressures: &[Millibars],
    reference: Millibars,
    levels: Vec<Kelvin>,
) -> Result<MoistAdiabatField, DomainError> {
    let nrows = pressures.len();
    let ncols = temperatures.len();
    debug!("Evaluating θ_ep mesh: {nrows} pressures × {ncols} temperatures");

    let rows: Vec<(f64, Vec<(f64, f64)>)> = pressures
        .par_iter()
        .map(|&p| -> Result<(f64, Vec<(f64, f64)>), DomainError> {
            let y = transform.y_from_p(p)?;
            let row = temperatures
                .iter()
                .map(|&t| -> Result<(f64, f64), DomainError> {
                    let theta_ep = saturated_theta_ep(t, p, reference)?;
                    let x = transform.x_from_tp(t.to_kelvin(), p)?;
                    Ok((*theta_ep, x))
                })
                .collect::<Result<Vec<_>, DomainError>>()?;
            Ok((y, row))
        })
        .collect::<Result<Vec<_>, DomainError>>()?;

    let theta_ep = DMatrix::from_fn(nrows, ncols, |i, j| rows[i].1[j].0);
    let x = DMatrix::from_fn(nrows, ncols, |i, j| rows[i].1[j].1);
    let y = DMatrix::from_fn(nrows, ncols, |i, _| rows[i].0);

    Ok(MoistAdiabatField {
        temperatures,
        pressures: pressures.to_vec(),
        theta_ep,
        x,
        y,
        levels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn small_field() -> MoistAdiabatField {
        let temperatures = vec![Celsius::new(-20.0), Celsius::new(0.0), Celsius::new(20.0)];
        let pressures = [Millibars::new(1000.0), Millibars::new(700.0)];
        evaluate(
            &SkewTransform::default(),
            temperatures,
            &pressures,
            Millibars::REFERENCE,
            vec![Kelvin::new(300.0)],
        )
        .unwrap()
    }

    #[test]
    fn field_shape_follows_meshgrid() {
        let field = small_field();
        assert_eq!(field.shape(), (2, 3));
        assert_eq!(field.x.shape(), (2, 3));
        assert_eq!(field.y.shape(), (2, 3));
    }

    #[test]
    fn field_matches_pointwise_formula() {
        let field = small_field();
        let t = Celsius::new(20.0);
        let p = Millibars::new(700.0);
        let w_s = bolton::saturation_mixing_ratio(p, t).unwrap();
        let expected =
            bolton::pseudo_equivalent_potential_temperature(t, p, w_s, Millibars::REFERENCE)
                .unwrap();
        assert_relative_eq!(*field.value_at(1, 2).unwrap(), *expected, epsilon = 1e-9);
        assert!(field.value_at(2, 0).is_none());
    }

    #[test]
    fn theta_ep_increases_with_temperature_along_row() {
        let field = small_field();
        for i in 0..2 {
            assert!(field.theta_ep[(i, 0)] < field.theta_ep[(i, 1)]);
            assert!(field.theta_ep[(i, 1)] < field.theta_ep[(i, 2)]);
        }
    }

    #[test]
    fn mesh_coordinates_match_transform() {
        let field = small_field();
        let transform = SkewTransform::default();
        let (x, y) = transform
            .from_thermo(Celsius::new(0.0), Millibars::new(700.0))
            .unwrap();
        assert_relative_eq!(field.x[(1, 1)], x, epsilon = 1e-12);
        assert_relative_eq!(field.y[(1, 1)], y, epsilon = 1e-12);
    }

    #[test]
    fn domain_error_aborts_field() {
        // e_s(40°C) ≈ 73.8 mb exceeds 50 mb
        let result = evaluate(
            &SkewTransform::default(),
            vec![Celsius::new(40.0)],
            &[Millibars::new(50.0)],
            Millibars::REFERENCE,
            Vec::new(),
        );
        assert!(matches!(
            result,
            Err(DomainError::SupersaturatedPressure { .. })
        ));
    }
}
