//! Thermodynamic formulas

pub mod bolton;
