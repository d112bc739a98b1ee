//! Data Module
//!
//! GeoJSON feature model, attribute extraction, bounds, and the
//! one-shot dataset loader.

mod bounds;
mod extract;
mod feature;
mod loader;

pub use bounds::Bounds;
pub use extract::{coerce_number, extract_values};
pub use feature::{Feature, FeatureCollection, Geometry};
pub use loader::{load_collection, load_datasets, DataSources};

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three loaded collections a layer can be built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetGroup {
    Physical,
    Socio,
    Indices,
}

impl DatasetGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetGroup::Physical => "physical",
            DatasetGroup::Socio => "socio",
            DatasetGroup::Indices => "indices",
        }
    }
}

impl fmt::Display for DatasetGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Indicator families. Each one maps onto its own dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorGroup {
    Physical,
    Socio,
}

impl IndicatorGroup {
    pub fn dataset(&self) -> DatasetGroup {
        match self {
            IndicatorGroup::Physical => DatasetGroup::Physical,
            IndicatorGroup::Socio => DatasetGroup::Socio,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.dataset().as_str()
    }
}

impl fmt::Display for IndicatorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for IndicatorGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "physical" => Ok(IndicatorGroup::Physical),
            "socio" => Ok(IndicatorGroup::Socio),
            other => Err(format!("unknown indicator group '{}'", other)),
        }
    }
}

/// All feature collections, loaded once before the first render
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub physical: FeatureCollection,
    pub socio: FeatureCollection,
    pub indices: FeatureCollection,
}

impl Datasets {
    pub fn new(physical: FeatureCollection, socio: FeatureCollection, indices: FeatureCollection) -> Self {
        Self { physical, socio, indices }
    }

    pub fn get(&self, group: DatasetGroup) -> &FeatureCollection {
        match group {
            DatasetGroup::Physical => &self.physical,
            DatasetGroup::Socio => &self.socio,
            DatasetGroup::Indices => &self.indices,
        }
    }
}
