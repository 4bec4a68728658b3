//! Dataset registry: where each master-data file came from and when it was written.
//! Updated by `normalize_master_data`; read by `validate` to report the data version.
//! The registry for a master file is the `registry.json` in the same directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::DataError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSetEntry {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    pub path: String,
}

pub type Registry = BTreeMap<String, DataSetEntry>;

pub const REGISTRY_FILE_NAME: &str = "registry.json";
pub const MASTER_DATASET: &str = "master";

/// Registry recording `master_path`.
pub fn registry_path_for(master_path: &Path) -> PathBuf {
    match master_path.parent() {
        Some(dir) => dir.join(REGISTRY_FILE_NAME),
        None => PathBuf::from(REGISTRY_FILE_NAME),
    }
}

/// Read the registry; a missing file is an empty registry.
pub fn load_registry(path: impl AsRef<Path>) -> Result<Registry, DataError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Registry::new());
    }
    let raw = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| DataError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save_registry(path: impl AsRef<Path>, registry: &Registry) -> Result<(), DataError> {
    let path = path.as_ref();
    let io_err = |source| DataError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let payload = serde_json::to_string_pretty(registry).map_err(|source| DataError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, payload).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_entries_round_trip_without_optional_fields() {
        let mut registry = Registry::new();
        registry.insert(
            MASTER_DATASET.to_string(),
            DataSetEntry {
                source: "api_start2".to_string(),
                data_version: None,
                last_updated: Some("2026-10-16".to_string()),
                path: "master.json".to_string(),
            },
        );
        let json = serde_json::to_string(&registry).unwrap();
        assert!(!json.contains("data_version"));
        let back: Registry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, registry);
    }

    #[test]
    fn registry_sits_beside_its_master_file() {
        assert_eq!(
            registry_path_for(Path::new(crate::data::DEFAULT_MASTER_PATH)),
            PathBuf::from("data/registry.json")
        );
        assert_eq!(
            registry_path_for(Path::new("/srv/catalog/master.json")),
            PathBuf::from("/srv/catalog/registry.json")
        );
        assert_eq!(
            registry_path_for(Path::new("master.json")),
            PathBuf::from("registry.json")
        );
    }

    #[test]
    fn missing_registry_file_is_empty() {
        let registry = load_registry("definitely/not/here/registry.json").unwrap();
        assert!(registry.is_empty());
    }
}
