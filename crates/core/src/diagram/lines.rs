//! Line artifacts handed to a renderer

use crate::core_types::units::Millibars;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// A point on the skew-T plotting plane
pub type PlotPoint = Point2<f64>;

/// Plotting-plane bounds of the diagram
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisExtent {
    /// x of the coldest axis temperature at the bottom pressure
    pub x_min: f64,
    /// x of the warmest axis temperature at the bottom pressure
    pub x_max: f64,
    /// y of the bottom pressure
    pub y_min: f64,
    /// y of the top pressure
    pub y_max: f64,
}

impl AxisExtent {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// True if the point falls inside the plotted area (edges included)
    #[must_use]
    pub fn contains(&self, point: &PlotPoint) -> bool {
        (self.x_min..=self.x_max).contains(&point.x) && (self.y_min..=self.y_max).contains(&point.y)
    }
}

/// A horizontal isobar spanning the diagram width
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Isobar {
    pub pressure: Millibars,
    pub y: f64,
    /// Left and right end points at `x_min` and `x_max`
    pub segment: [PlotPoint; 2],
}

/// One member of a reference line family, labelled by its level
///
/// `L` carries the level's unit: `Celsius` for isotherms, `Kelvin` for dry
/// adiabats, `MixingRatio` for mixing ratio isopleths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLine<L> {
    pub level: L,
    /// Vertices ordered from high to low pressure
    pub points: Vec<PlotPoint>,
}

impl<L> ReferenceLine<L> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
