//! Sounding profiles: raw records, validation, per-level diagnostics and a
//! text reader.

pub mod reader;
pub mod record;

pub use reader::{parse_profile, read_profile};
pub use record::{
    LevelDiagnostics, SoundingProfile, SoundingRecord, ValidRecord, PRESSURE_RANGE_MB,
    TEMPERATURE_RANGE_C,
};
