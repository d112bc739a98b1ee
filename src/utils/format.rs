//! Display Formatting
//!
//! Shared number formatting for popups and legends.

use serde_json::Value;

use crate::data::coerce_number;

/// Shown in place of a missing or non-numeric value
pub const PLACEHOLDER: &str = "—";

pub fn format_number(value: f64) -> String {
    format!("{:.2}", value)
}

/// Two decimals for anything numeric, the placeholder otherwise.
pub fn format_value(value: Option<&Value>) -> String {
    value
        .and_then(coerce_number)
        .map(format_number)
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}
