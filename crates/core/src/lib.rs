//! Skew-T Log-P Core Library
//!
//! Thermodynamic core of a Skew-T Log-P diagram. Implements Bolton's (1980)
//! moist thermodynamics, the skewed log-pressure coordinate transform and the
//! generation of every reference line family a sounding is drawn against.
//!
//! ## Pipeline
//!
//! - [`sounding`]: parse a comma separated sounding and validate its records
//! - [`physics::bolton`]: vapor pressure, mixing ratio, LCL and θ_ep formulas
//! - [`diagram`]: transform, line families and the saturated θ_ep field
//!
//! ```
//! use skewt_core::{AdiabatFieldGenerator, DiagramConfig, SoundingProfile, SoundingRecord};
//! use skewt_core::{Celsius, Millibars};
//!
//! let config = DiagramConfig::default()
//!     .with_pressure_range(Millibars::new(1050.0), Millibars::new(150.0), 25.0)
//!     .with_mesh(Celsius::new(-60.0), 5.0);
//! let generator = AdiabatFieldGenerator::new(config).unwrap();
//! let profile = SoundingProfile::new(vec![SoundingRecord::new(1000.0, 0.0, 20.0, 15.0)]);
//! let diagram = generator.generate(&profile).unwrap();
//! assert_eq!(diagram.trace.len(), 1);
//! ```

// Core types and utilities
pub mod core_types;
pub mod error;

pub mod diagram;
pub mod physics;
pub mod sounding;

// Re-export core types
pub use core_types::{Celsius, Kelvin, Meters, Millibars, MixingRatio, Percent};
pub use error::{DomainError, RecordField, Result, SkewTError, ValidationError};

// Re-export diagram types
pub use diagram::{
    AdiabatFieldGenerator, AxisExtent, DiagramConfig, DiagramLevelSet, Isobar,
    MoistAdiabatField, PlotPoint, ReferenceLine, SkewTDiagram, SkewTransform, SoundingTrace,
};
pub use sounding::{
    parse_profile, read_profile, LevelDiagnostics, SoundingProfile, SoundingRecord, ValidRecord,
};
