//! Geographic Bounds
//!
//! Lon/lat bounding boxes gathered from GeoJSON coordinate arrays.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Axis-aligned lon/lat box. An empty box (nothing extended into it) is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::empty()
    }
}

impl Bounds {
    pub fn empty() -> Self {
        Self {
            south: f64::INFINITY,
            west: f64::INFINITY,
            north: f64::NEG_INFINITY,
            east: f64::NEG_INFINITY,
        }
    }

    /// True once at least one finite position has been added
    pub fn is_valid(&self) -> bool {
        self.south.is_finite()
            && self.west.is_finite()
            && self.north.is_finite()
            && self.east.is_finite()
            && self.south <= self.north
            && self.west <= self.east
    }

    pub fn extend(&mut self, lon: f64, lat: f64) {
        if !lon.is_finite() || !lat.is_finite() {
            return;
        }
        self.west = self.west.min(lon);
        self.east = self.east.max(lon);
        self.south = self.south.min(lat);
        self.north = self.north.max(lat);
    }

    pub fn merge(&mut self, other: &Bounds) {
        if !other.is_valid() {
            return;
        }
        self.extend(other.west, other.south);
        self.extend(other.east, other.north);
    }

    /// Grow each side by `ratio` times the box extent on that axis.
    pub fn pad(&self, ratio: f64) -> Bounds {
        if !self.is_valid() {
            return *self;
        }
        let lat_buffer = (self.north - self.south).abs() * ratio;
        let lon_buffer = (self.east - self.west).abs() * ratio;
        Bounds {
            south: self.south - lat_buffer,
            west: self.west - lon_buffer,
            north: self.north + lat_buffer,
            east: self.east + lon_buffer,
        }
    }

    /// Walk a GeoJSON `coordinates` value of any nesting depth.
    pub fn extend_coordinates(&mut self, coords: &Value) {
        let Value::Array(items) = coords else {
            return;
        };
        match (items.first(), items.get(1)) {
            (Some(Value::Number(lon)), Some(Value::Number(lat))) => {
                if let (Some(lon), Some(lat)) = (lon.as_f64(), lat.as_f64()) {
                    self.extend(lon, lat);
                }
            }
            _ => {
                for item in items {
                    self.extend_coordinates(item);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_is_invalid() {
        assert!(!Bounds::empty().is_valid());
    }

    #[test]
    fn test_extend_nested_polygon() {
        let mut b = Bounds::empty();
        b.extend_coordinates(&json!([[[39.5, -4.0], [40.5, -4.0], [40.5, -3.0], [39.5, -4.0]]]));
        assert!(b.is_valid());
        assert_eq!(b.west, 39.5);
        assert_eq!(b.east, 40.5);
        assert_eq!(b.south, -4.0);
        assert_eq!(b.north, -3.0);
    }

    #[test]
    fn test_pad_grows_each_side() {
        let mut b = Bounds::empty();
        b.extend(0.0, 0.0);
        b.extend(10.0, 20.0);
        let p = b.pad(0.05);
        assert!((p.west + 0.5).abs() < 1e-9);
        assert!((p.east - 10.5).abs() < 1e-9);
        assert!((p.south + 1.0).abs() < 1e-9);
        assert!((p.north - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_point_is_valid() {
        let mut b = Bounds::empty();
        b.extend_coordinates(&json!([40.0, -3.6]));
        assert!(b.is_valid());
        assert_eq!(b.pad(0.2), b);
    }

    #[test]
    fn test_non_finite_ignored() {
        let mut b = Bounds::empty();
        b.extend(f64::NAN, 1.0);
        assert!(!b.is_valid());
    }
}
