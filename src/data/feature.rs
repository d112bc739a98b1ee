//! GeoJSON Feature Model
//!
//! Only the parts of GeoJSON the atlas reads: geometry coordinates for
//! bounds, and the flat property map.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

use super::{coerce_number, Bounds};
use crate::error::{AtlasError, AtlasResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub coordinates: Value,
    /// Members of a `GeometryCollection`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub geometries: Vec<Geometry>,
}

impl Geometry {
    pub fn extend_bounds(&self, bounds: &mut Bounds) {
        bounds.extend_coordinates(&self.coordinates);
        for g in &self.geometries {
            g.extend_bounds(bounds);
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Feature {
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

impl Feature {
    /// Build a geometry-less feature from a JSON object (non-objects give no properties).
    pub fn with_properties(properties: Value) -> Self {
        Self {
            geometry: None,
            properties: match properties {
                Value::Object(map) => Some(map),
                _ => None,
            },
        }
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.as_ref().and_then(|p| p.get(name))
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.property(name).and_then(coerce_number)
    }

    /// Attribute as display text; `None` when absent or null.
    pub fn text(&self, name: &str) -> Option<String> {
        match self.property(name)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn bounds(&self) -> Bounds {
        let mut bounds = Bounds::empty();
        if let Some(geometry) = &self.geometry {
            geometry.extend_bounds(&mut bounds);
        }
        bounds
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn from_json_str(name: &str, json: &str) -> AtlasResult<Self> {
        serde_json::from_str(json).map_err(|source| AtlasError::Dataset {
            name: name.to_string(),
            source,
        })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }

    pub fn bounds(&self) -> Bounds {
        let mut bounds = Bounds::empty();
        for feature in &self.features {
            bounds.merge(&feature.bounds());
        }
        bounds
    }

    /// Union of property names across every feature
    pub fn attribute_names(&self) -> BTreeSet<String> {
        self.features
            .iter()
            .filter_map(|f| f.properties.as_ref())
            .flat_map(|p| p.keys().cloned())
            .collect()
    }
}

impl<'a> IntoIterator for &'a FeatureCollection {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}
