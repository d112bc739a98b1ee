//! Configuration
//!
//! `AtlasConfig` is read from YAML once at startup. Every section is
//! optional; omitted sections take the built-in defaults.

mod fields;

pub use fields::{FieldDescriptor, FieldIssue, FieldTable, IndexField, IndicatorField};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::data::DataSources;
use crate::error::AtlasResult;
use crate::render::ViewState;
use crate::style::{Palette, PopupFields};

pub const DEFAULT_CONFIG_PATH: &str = "atlas.yaml";

/// Viewport behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    /// Padding ratio applied when fitting a freshly rendered layer
    pub fit_padding: f64,
    /// Padding ratio applied when zooming to a county
    pub county_padding: f64,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self { fit_padding: 0.05, county_padding: 0.2 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: "127.0.0.1:8080".to_string() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    pub data: DataSources,
    pub fields: FieldTable,
    pub palette: Palette,
    pub popup: PopupFields,
    pub map: MapOptions,
    pub default_view: ViewState,
    pub server: ServerConfig,
    /// Used when `RUST_LOG` is unset
    pub log_filter: Option<String>,
    /// Abort startup when the field table names attributes the data lacks
    pub strict_fields: bool,
}

impl AtlasConfig {
    pub fn from_yaml_str(yaml: &str) -> AtlasResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read and parse `path`. `Ok(None)` when the file does not exist, so
    /// the caller can fall back to the defaults.
    pub async fn load(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        let yaml = match fs::read_to_string(path).await {
            Ok(yaml) => yaml,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("Failed to read config file {}", path.display())),
        };
        let config = Self::from_yaml_str(&yaml)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(Some(config))
    }

    /// Apply `ATLAS_DATA_DIR` and `ATLAS_BIND` overrides from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("ATLAS_DATA_DIR") {
            self.data = self.data.rooted_at(PathBuf::from(dir));
        }
        if let Some(bind) = lookup("ATLAS_BIND") {
            self.server.bind = bind;
        }
    }

    /// Config path from `ATLAS_CONFIG`, else [`DEFAULT_CONFIG_PATH`]
    pub fn path_from_env() -> PathBuf {
        std::env::var("ATLAS_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::IndicatorGroup;
    use crate::style::Rgb;
    use tempfile::tempdir;

    #[test]
    fn test_empty_yaml_is_default() {
        let config = AtlasConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, AtlasConfig::default());
        assert_eq!(config.default_view, ViewState::index("CVI"));
        assert_eq!(config.map.fit_padding, 0.05);
    }

    #[test]
    fn test_sections_override() {
        let yaml = r##"
default_view: { kind: indicator, group: socio, key: LULC }
palette: ["#ffffff", "#cccccc", "#999999", "#666666", "#000000"]
popup: { segment: SEG_ID }
map: { county_padding: 0.5 }
strict_fields: true
"##;
        let config = AtlasConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.default_view, ViewState::indicator(IndicatorGroup::Socio, "LULC"));
        assert_eq!(config.palette.colors()[4], Rgb::new(0, 0, 0));
        assert_eq!(config.popup.segment, "SEG_ID");
        assert_eq!(config.popup.county, "County");
        assert_eq!(config.map.county_padding, 0.5);
        assert_eq!(config.map.fit_padding, 0.05);
        assert!(config.strict_fields);
    }

    #[test]
    fn test_bad_palette_rejected() {
        assert!(AtlasConfig::from_yaml_str("palette: ['#fff']").is_err());
        assert!(AtlasConfig::from_yaml_str("palette: ['red', '#fff', '#fff', '#fff', '#fff']").is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = AtlasConfig::default();
        config.apply_overrides(|k| match k {
            "ATLAS_DATA_DIR" => Some("/srv/atlas".to_string()),
            "ATLAS_BIND" => Some("0.0.0.0:9000".to_string()),
            _ => None,
        });
        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert_eq!(config.data.socio, PathBuf::from("/srv/atlas/STORYMAP_SHP/Socio_Indicators.json"));
    }

    #[tokio::test]
    async fn test_load_missing_and_present() {
        let dir = tempdir().unwrap();
        let missing = AtlasConfig::load(dir.path().join("absent.yaml")).await.unwrap();
        assert!(missing.is_none());
        assert!(AtlasConfig::load(dir.path()).await.is_err());

        let path = dir.path().join("atlas.yaml");
        std::fs::write(&path, "server: { bind: '127.0.0.1:1' }\n").unwrap();
        let loaded = AtlasConfig::load(&path).await.unwrap().unwrap();
        assert_eq!(loaded.server.bind, "127.0.0.1:1");
    }
}
