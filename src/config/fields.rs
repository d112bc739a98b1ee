//! Field Table
//!
//! Every selectable indicator and composite index, keyed by the short
//! names the page uses (`SLR`, `LULC`, `CVI`, ...).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::data::{DatasetGroup, Datasets, IndicatorGroup};

/// A ranked indicator: a raw value plus a precomputed 1-5 rank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorField {
    pub value: String,
    pub rank: String,
    pub title: String,
}

/// A composite index classified by equal-interval breaks at runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexField {
    pub value: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldDescriptor {
    Indicator(IndicatorField),
    Index(IndexField),
}

impl FieldDescriptor {
    pub fn value_field(&self) -> &str {
        match self {
            FieldDescriptor::Indicator(f) => &f.value,
            FieldDescriptor::Index(f) => &f.value,
        }
    }

    pub fn rank_field(&self) -> Option<&str> {
        match self {
            FieldDescriptor::Indicator(f) => Some(&f.rank),
            FieldDescriptor::Index(_) => None,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            FieldDescriptor::Indicator(f) => &f.title,
            FieldDescriptor::Index(f) => &f.title,
        }
    }
}

/// A descriptor attribute that no feature in its dataset carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub dataset: DatasetGroup,
    pub key: String,
    pub field: String,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}: attribute '{}' not found in dataset", self.dataset, self.key, self.field)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldTable {
    pub physical: BTreeMap<String, IndicatorField>,
    pub socio: BTreeMap<String, IndicatorField>,
    pub indices: BTreeMap<String, IndexField>,
}

impl FieldTable {
    pub fn group(&self, group: IndicatorGroup) -> &BTreeMap<String, IndicatorField> {
        match group {
            IndicatorGroup::Physical => &self.physical,
            IndicatorGroup::Socio => &self.socio,
        }
    }

    pub fn indicator(&self, group: IndicatorGroup, key: &str) -> Option<&IndicatorField> {
        self.group(group).get(key)
    }

    pub fn index(&self, key: &str) -> Option<&IndexField> {
        self.indices.get(key)
    }

    /// Check every descriptor against the attribute names present in
    /// its dataset. Empty datasets are skipped; there is nothing to check.
    pub fn validate(&self, datasets: &Datasets) -> Vec<FieldIssue> {
        let mut issues = Vec::new();

        for group in [IndicatorGroup::Physical, IndicatorGroup::Socio] {
            let dataset = group.dataset();
            let collection = datasets.get(dataset);
            if collection.is_empty() {
                continue;
            }
            let names = collection.attribute_names();
            for (key, field) in self.group(group) {
                for attr in [&field.value, &field.rank] {
                    if !names.contains(attr.as_str()) {
                        issues.push(FieldIssue { dataset, key: key.clone(), field: attr.clone() });
                    }
                }
            }
        }

        if !datasets.indices.is_empty() {
            let names = datasets.indices.attribute_names();
            for (key, field) in &self.indices {
                if !names.contains(field.value.as_str()) {
                    issues.push(FieldIssue {
                        dataset: DatasetGroup::Indices,
                        key: key.clone(),
                        field: field.value.clone(),
                    });
                }
            }
        }

        issues
    }
}

fn indicator(value: &str, rank: &str, title: &str) -> IndicatorField {
    IndicatorField { value: value.into(), rank: rank.into(), title: title.into() }
}

fn index(value: &str, title: &str) -> IndexField {
    IndexField { value: value.into(), title: title.into() }
}

impl Default for FieldTable {
    fn default() -> Self {
        let physical = BTreeMap::from([
            ("SLR".to_string(), indicator("grid_cod_1", "RANK_SLR", "Sea-Level Rise (ranked)")),
            ("SWH".to_string(), indicator("MEAN_SIG_W", "RANK_SIGWA", "Mean Significant Wave Height (ranked)")),
            ("SLOPE".to_string(), indicator("grid_code1", "RANK_SLOPE", "Coastal Slope (ranked)")),
            ("GEOM".to_string(), indicator("CLASS", "RANK_GEOMO", "Geomorphology (ranked)")),
            ("SLC".to_string(), indicator("WLR", "RANK_SLC", "Shoreline Change (ranked)")),
            ("BATHY".to_string(), indicator("grid_code", "RANK_BATHY", "Bathymetry (ranked)")),
            ("TIDE".to_string(), indicator("TIDAL_RANG", "RANK_TIDAL", "Mean Tidal Range (ranked)")),
            ("ELEV".to_string(), indicator("grid_code_", "RANK_ELEVA", "Coastal Elevation (ranked)")),
        ]);
        let socio = BTreeMap::from([
            ("LULC".to_string(), indicator("LULC_Class", "RANK_LULC", "Land Use / Land Cover (ranked)")),
            ("POP".to_string(), indicator("gridcode", "RANK_POP", "Population Density (ranked)")),
            ("ROAD".to_string(), indicator("NEAR_DIST", "RANK_ROADS", "Distance from Roads (ranked)")),
        ]);
        let indices = BTreeMap::from([
            ("CVI".to_string(), index("CVI", "Coastal Vulnerability Index")),
            ("PVI".to_string(), index("PVI_nrm", "Physical Vulnerability Index")),
            ("SoVI".to_string(), index("SVI_nrm", "Social Vulnerability Index")),
        ]);
        Self { physical, socio, indices }
    }
}
