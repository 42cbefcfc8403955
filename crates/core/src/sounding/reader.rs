//! Comma-delimited sounding reader
//!
//! Reads SPC-style text soundings: one level per line,
//! `pressure (mb), altitude (m), temperature (°C), dewpoint (°C)[, ...]`.
//! Trailing columns (wind direction, speed) are ignored. Blank lines and
//! `#` comments are skipped. Values are not range-checked here; that is
//! [`SoundingRecord::validate`](super::SoundingRecord::validate)'s job.

use super::record::{SoundingProfile, SoundingRecord};
use crate::error::{Result, SkewTError};
use std::io::BufRead;
use tracing::debug;

const REQUIRED_COLUMNS: [&str; 4] = ["pressure", "altitude", "temperature", "dewpoint"];

fn parse_line(line: &str, line_number: usize) -> Result<SoundingRecord> {
    let mut fields = line.split(',').map(str::trim);
    let mut values = [0.0_f64; 4];

    for (slot, name) in values.iter_mut().zip(REQUIRED_COLUMNS) {
        let raw = fields.next().ok_or_else(|| SkewTError::Parse {
            line: line_number,
            message: format!("missing {name} column"),
        })?;
        *slot = raw.parse::<f64>().map_err(|e| SkewTError::Parse {
            line: line_number,
            message: format!("invalid {name} '{raw}': {e}"),
        })?;
    }

    let [pressure_mb, altitude_m, temperature_c, dewpoint_c] = values;
    Ok(SoundingRecord::new(
        pressure_mb,
        altitude_m,
        temperature_c,
        dewpoint_c,
    ))
}

/// Read a sounding profile, skipping the first `skip_rows` lines
///
/// # Errors
/// `SkewTError::Io` on read failure, `SkewTError::Parse` (with 1-based line
/// number) for a short or non-numeric line.
pub fn read_profile<R: BufRead>(reader: R, skip_rows: usize) -> Result<SoundingProfile> {
    let mut records = Vec::new();

    for (i, line) in reader.lines().enumerate().skip(skip_rows) {
        let line = line?;
        let content = line.trim();
        if content.is_empty() || content.starts_with('#') {
            continue;
        }
        records.push(parse_line(content, i + 1)?);
    }

    debug!("Read {} sounding records", records.len());
    Ok(SoundingProfile::new(records))
}

/// Parse a sounding profile held in memory
///
/// # Errors
/// See [`read_profile`].
pub fn parse_profile(text: &str, skip_rows: usize) -> Result<SoundingProfile> {
    read_profile(text.as_bytes(), skip_rows)
}
