//! Value Extraction
//!
//! Pulls numeric attributes out of loosely typed GeoJSON properties.

use serde_json::Value;

use super::Feature;

/// Interpret a property as a finite number.
///
/// Numbers and numeric strings convert; null, empty or non-numeric
/// strings, booleans, arrays and objects do not.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse::<f64>().ok().filter(|v| v.is_finite())
        }
        _ => None,
    }
}

/// Every usable value of `field` across `features`, in feature order.
pub fn extract_values<'a, I>(features: I, field: &str) -> Vec<f64>
where
    I: IntoIterator<Item = &'a Feature>,
{
    features
        .into_iter()
        .filter_map(|f| f.number(field))
        .collect()
}
