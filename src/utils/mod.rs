//! Utils Module
pub mod format;
pub mod telemetry;

pub use format::{format_number, format_value, PLACEHOLDER};
