//! Dataset Loader
//!
//! Reads the three GeoJSON collections from disk once, before the
//! controller is built.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use super::{Datasets, FeatureCollection};

/// Where each collection lives on disk
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataSources {
    pub physical: PathBuf,
    pub socio: PathBuf,
    /// Combined collection carrying CVI, PVI and SoVI
    pub indices: PathBuf,
}

impl Default for DataSources {
    fn default() -> Self {
        Self {
            physical: PathBuf::from("STORYMAP_SHP/Physical_Indicators.json"),
            socio: PathBuf::from("STORYMAP_SHP/Socio_Indicators.json"),
            indices: PathBuf::from("STORYMAP_SHP/CVI.json"),
        }
    }
}

impl DataSources {
    /// Re-root relative paths under `base`
    pub fn rooted_at(&self, base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        let root = |p: &PathBuf| if p.is_absolute() { p.clone() } else { base.join(p) };
        Self {
            physical: root(&self.physical),
            socio: root(&self.socio),
            indices: root(&self.indices),
        }
    }
}

pub async fn load_collection(name: &str, path: impl AsRef<Path>) -> Result<FeatureCollection> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {} dataset from {}", name, path.display()))?;

    let collection = FeatureCollection::from_json_str(name, &json)
        .with_context(|| format!("Failed to deserialize {} dataset", name))?;

    info!("Loaded {} dataset: {} features", name, collection.len());
    Ok(collection)
}

/// Load all three collections concurrently
pub async fn load_datasets(sources: &DataSources) -> Result<Datasets> {
    let (physical, socio, indices) = tokio::try_join!(
        load_collection("physical", &sources.physical),
        load_collection("socio", &sources.socio),
        load_collection("indices", &sources.indices),
    )?;
    Ok(Datasets::new(physical, socio, indices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_load_datasets() {
        let dir = tempdir().unwrap();
        let one = r#"{"type":"FeatureCollection","features":[{"type":"Feature","geometry":null,"properties":{"CVI":1}}]}"#;
        let empty = r#"{"type":"FeatureCollection","features":[]}"#;
        std::fs::create_dir_all(dir.path().join("STORYMAP_SHP")).unwrap();
        std::fs::write(dir.path().join("STORYMAP_SHP/Physical_Indicators.json"), empty).unwrap();
        std::fs::write(dir.path().join("STORYMAP_SHP/Socio_Indicators.json"), empty).unwrap();
        std::fs::write(dir.path().join("STORYMAP_SHP/CVI.json"), one).unwrap();

        let sources = DataSources::default().rooted_at(dir.path());
        let datasets = load_datasets(&sources).await.unwrap();
        assert!(datasets.physical.is_empty());
        assert_eq!(datasets.indices.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_file_names_dataset() {
        let dir = tempdir().unwrap();
        let err = load_collection("socio", dir.path().join("nope.json")).await.unwrap_err();
        assert!(format!("{:#}", err).contains("socio"));
    }

    #[test]
    fn test_rooted_keeps_absolute() {
        let sources = DataSources {
            physical: PathBuf::from("/abs/p.json"),
            ..DataSources::default()
        };
        let rooted = sources.rooted_at("/data");
        assert_eq!(rooted.physical, PathBuf::from("/abs/p.json"));
        assert_eq!(rooted.indices, PathBuf::from("/data/STORYMAP_SHP/CVI.json"));
    }
}
