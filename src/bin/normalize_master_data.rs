//! Normalize the game's raw master export into the catalog file the scorers load.
//! Usage: normalize_master_data <api_start2.json> <ship_classes.json> [out.json]
//! Writes data/master.json by default and records it in the registry.json beside it.
//! The class table is a JSON array of `{ "ctype", "name", "nationality" }`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;

use gear_synergy::data::registry::MASTER_DATASET;
use gear_synergy::data::{
    load_registry, registry_path_for, save_registry, DataSetEntry, GearCategoryEntry, GearRecord,
    MasterFile, ShipClassEntry, ShipRecord, ShipTypeEntry, DEFAULT_MASTER_PATH,
};

const SOURCE: &str = "api_start2";

#[derive(Debug, Deserialize)]
struct RawExport {
    api_data: RawData,
}

#[derive(Debug, Deserialize)]
struct RawData {
    #[serde(default)]
    api_mst_ship: Vec<ShipRecord>,
    #[serde(default)]
    api_mst_slotitem: Vec<GearRecord>,
    #[serde(default)]
    api_mst_slotitem_equiptype: Vec<GearCategoryEntry>,
    #[serde(default)]
    api_mst_stype: Vec<ShipTypeEntry>,
}

/// Resolve path relative to repo root (CARGO_MANIFEST_DIR when run via cargo).
fn repo_data_path(suffix: &str) -> PathBuf {
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        return PathBuf::from(manifest_dir).join(suffix);
    }
    PathBuf::from(suffix)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(path).map_err(|e| format!("Read {}: {}", path.display(), e))?;
    Ok(serde_json::from_str(&raw).map_err(|e| format!("Parse {}: {}", path.display(), e))?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let (Some(export_path), Some(classes_path)) = (args.get(1), args.get(2)) else {
        return Err(
            "Usage: normalize_master_data <api_start2.json> <ship_classes.json> [out.json]".into(),
        );
    };
    let output_path = args
        .get(3)
        .map(PathBuf::from)
        .unwrap_or_else(|| repo_data_path(DEFAULT_MASTER_PATH));

    let export: RawExport = read_json(Path::new(export_path))?;
    let ship_classes: Vec<ShipClassEntry> = read_json(Path::new(classes_path))?;
    let data_version = chrono::Utc::now().format("%Y-%m-%d").to_string();

    let mut master = MasterFile {
        data_version: Some(data_version.clone()),
        source_note: Some(format!("{SOURCE} + {}", Path::new(classes_path).display())),
        ships: export.api_data.api_mst_ship,
        ship_types: export.api_data.api_mst_stype,
        ship_classes,
        gears: export.api_data.api_mst_slotitem,
        gear_categories: export.api_data.api_mst_slotitem_equiptype,
    };
    master.sort_catalogs();

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output_path, serde_json::to_string_pretty(&master)?)?;
    println!(
        "Wrote {} ships, {} gears, {} classes to {}",
        master.ships.len(),
        master.gears.len(),
        master.ship_classes.len(),
        output_path.display()
    );

    let registry_path = registry_path_for(&output_path);
    let mut registry = load_registry(&registry_path)?;
    registry.insert(
        MASTER_DATASET.to_string(),
        DataSetEntry {
            source: SOURCE.to_string(),
            data_version: Some(data_version.clone()),
            last_updated: Some(data_version),
            path: output_path.display().to_string(),
        },
    );
    save_registry(&registry_path, &registry)?;
    println!("Updated {}", registry_path.display());
    Ok(())
}
