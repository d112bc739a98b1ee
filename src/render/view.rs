//! View State
//!
//! The one selection driving which dataset, scheme and legend are shown.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{FieldDescriptor, FieldTable};
use crate::data::{DatasetGroup, IndicatorGroup};
use crate::error::{AtlasError, AtlasResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewState {
    /// One ranked indicator from the physical or socio family
    Indicator { group: IndicatorGroup, key: String },
    /// One composite index from the combined indices dataset
    Index { key: String },
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::Index { key: "CVI".to_string() }
    }
}

impl ViewState {
    pub fn indicator(group: IndicatorGroup, key: impl Into<String>) -> Self {
        ViewState::Indicator { group, key: key.into() }
    }

    pub fn index(key: impl Into<String>) -> Self {
        ViewState::Index { key: key.into() }
    }

    pub fn dataset(&self) -> DatasetGroup {
        match self {
            ViewState::Indicator { group, .. } => group.dataset(),
            ViewState::Index { .. } => DatasetGroup::Indices,
        }
    }

    /// Look the selection up in the field table
    pub fn resolve(&self, fields: &FieldTable) -> AtlasResult<FieldDescriptor> {
        match self {
            ViewState::Indicator { group, key } => fields
                .indicator(*group, key)
                .cloned()
                .map(FieldDescriptor::Indicator)
                .ok_or_else(|| AtlasError::UnknownIndicator { group: *group, key: key.clone() }),
            ViewState::Index { key } => fields
                .index(key)
                .cloned()
                .map(FieldDescriptor::Index)
                .ok_or_else(|| AtlasError::UnknownIndex(key.clone())),
        }
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewState::Indicator { group, key } => write!(f, "indicator {}/{}", group, key),
            ViewState::Index { key } => write!(f, "index {}", key),
        }
    }
}
