//! Error Types
//!
//! Failures the atlas can report. Missing attribute values are not errors;
//! they are resolved by classification policy and never reach this enum.

use thiserror::Error;

use crate::data::IndicatorGroup;

pub type AtlasResult<T> = Result<T, AtlasError>;

#[derive(Debug, Error)]
pub enum AtlasError {
    /// No indicator with this key exists in the group's field table
    #[error("unknown indicator '{key}' in group '{group}'")]
    UnknownIndicator { group: IndicatorGroup, key: String },

    /// No composite index with this key exists in the field table
    #[error("unknown index '{0}'")]
    UnknownIndex(String),

    #[error("invalid color '{0}': expected #RRGGBB")]
    InvalidColor(String),

    #[error("palette must have exactly 5 colors, got {0}")]
    PaletteSize(usize),

    #[error("failed to parse config: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("failed to parse dataset '{name}': {source}")]
    Dataset {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("field table references {0} attribute(s) missing from the loaded datasets")]
    FieldValidation(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
