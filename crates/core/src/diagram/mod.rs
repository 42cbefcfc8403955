//! Skew-T diagram construction
//!
//! - [`transform`]: the (T, p) ⇄ (x, y) coordinate mapping
//! - [`config`]: reference levels and sampling resolution
//! - [`generator`]: line families, the moist adiabat field and sounding traces
//!
//! Output is plain data. Rendering and contour extraction belong to the caller.

pub mod config;
pub mod field;
pub mod generator;
pub mod lines;
pub mod trace;
pub mod transform;

pub use config::{DiagramConfig, DiagramLevelSet, RAP_MIXING_RATIOS_G_PER_KG};
pub use field::MoistAdiabatField;
pub use generator::{AdiabatFieldGenerator, SkewTDiagram};
pub use lines::{AxisExtent, Isobar, PlotPoint, ReferenceLine};
pub use trace::SoundingTrace;
pub use transform::{SkewTransform, DEFAULT_SKEW_SLOPE};
