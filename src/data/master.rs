//! Master Data Index: the ship and equipment catalogs, loaded once and shared
//! read-only. Lookups are binary searches over catalogs sorted ascending by id.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::data::gear::{GearCategoryEntry, GearRecord};
use crate::data::loose::LooseNumber;
use crate::data::ship::{ShipClassEntry, ShipRecord, ShipTypeEntry, UnitRecord};
use crate::error::DataError;

pub const DEFAULT_MASTER_PATH: &str = "data/master.json";

/// Anything stored in a catalog sorted by integer id.
pub trait Keyed {
    fn key(&self) -> i64;
}

impl Keyed for ShipRecord {
    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for GearRecord {
    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for ShipTypeEntry {
    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for ShipClassEntry {
    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for GearCategoryEntry {
    fn key(&self) -> i64 {
        self.id
    }
}

/// Binary search for `id` in a catalog sorted ascending by key.
///
/// A hit is only reported when the record's key equals `id` exactly.
pub fn lookup<T: Keyed>(catalog: &[T], id: i64) -> Option<&T> {
    let index = catalog.binary_search_by_key(&id, Keyed::key).ok()?;
    catalog.get(index).filter(|record| record.key() == id)
}

/// [lookup] for a loosely-typed identifier, coerced by truncation first.
pub fn lookup_loose<'a, T: Keyed>(catalog: &'a [T], id: &LooseNumber) -> Option<&'a T> {
    lookup(catalog, id.as_id())
}

/// On-disk shape of the normalized master data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MasterFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_note: Option<String>,
    pub ships: Vec<ShipRecord>,
    #[serde(default)]
    pub ship_types: Vec<ShipTypeEntry>,
    #[serde(default)]
    pub ship_classes: Vec<ShipClassEntry>,
    pub gears: Vec<GearRecord>,
    #[serde(default)]
    pub gear_categories: Vec<GearCategoryEntry>,
}

impl MasterFile {
    /// Read the file as stored, without sorting.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| DataError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn sort_catalogs(&mut self) {
        sort_by_key_if_needed("ships", &mut self.ships);
        sort_by_key_if_needed("ship_types", &mut self.ship_types);
        sort_by_key_if_needed("ship_classes", &mut self.ship_classes);
        sort_by_key_if_needed("gears", &mut self.gears);
        sort_by_key_if_needed("gear_categories", &mut self.gear_categories);
    }
}

pub(crate) fn is_sorted_by_key<T: Keyed>(catalog: &[T]) -> bool {
    catalog.windows(2).all(|pair| pair[0].key() <= pair[1].key())
}

fn sort_by_key_if_needed<T: Keyed>(name: &str, catalog: &mut [T]) {
    if !is_sorted_by_key(catalog) {
        warn!(catalog = name, "catalog not sorted by id; sorting");
        catalog.sort_by_key(Keyed::key);
    }
}

/// Read-only master data plus the dictionaries derived from it.
#[derive(Debug, Clone)]
pub struct MasterData {
    ships: Vec<ShipRecord>,
    ship_types: Vec<ShipTypeEntry>,
    ship_classes: Vec<ShipClassEntry>,
    gears: Vec<GearRecord>,
    ship_ids_by_name: HashMap<String, i64>,
    gear_ids_by_name: HashMap<String, i64>,
    category_ids_by_name: HashMap<String, i64>,
}

impl MasterData {
    pub fn from_file(mut file: MasterFile) -> Self {
        file.sort_catalogs();

        let mut ship_ids_by_name = HashMap::with_capacity(file.ships.len());
        for ship in &file.ships {
            ship_ids_by_name.entry(ship.name.clone()).or_insert(ship.id);
        }

        let mut gear_ids_by_name = HashMap::with_capacity(file.gears.len());
        for gear in file.gears.iter().filter(|gear| gear.is_equippable()) {
            gear_ids_by_name.insert(gear.name.clone(), gear.id);
        }

        let category_ids_by_name = file
            .gear_categories
            .iter()
            .map(|category| (category.name.clone(), category.id))
            .collect();

        debug!(
            ships = file.ships.len(),
            gears = file.gears.len(),
            version = file.data_version.as_deref().unwrap_or("unknown"),
            "master data indexed"
        );

        MasterData {
            ships: file.ships,
            ship_types: file.ship_types,
            ship_classes: file.ship_classes,
            gears: file.gears,
            ship_ids_by_name,
            gear_ids_by_name,
            category_ids_by_name,
        }
    }

    /// Load and index the normalized master file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataError> {
        MasterFile::read(path).map(Self::from_file)
    }

    pub fn ship(&self, id: i64) -> Option<&ShipRecord> {
        lookup(&self.ships, id)
    }

    pub fn gear(&self, id: i64) -> Option<&GearRecord> {
        lookup(&self.gears, id)
    }

    /// Ship record with its type, class and nationality resolved.
    pub fn unit(&self, id: &LooseNumber) -> Option<UnitRecord<'_>> {
        let ship = lookup_loose(&self.ships, id)?;
        let class = lookup(&self.ship_classes, ship.ctype);
        Some(UnitRecord {
            id: ship.id,
            name: &ship.name,
            yomi: &ship.yomi,
            ship_type: lookup(&self.ship_types, ship.stype).map(|entry| entry.name.as_str()),
            class_name: class.map(|entry| entry.name.as_str()),
            nationality: class.map(|entry| entry.nationality.as_str()),
            remodel_tier: ship.remodel_tier(),
        })
    }

    /// Ship id by display name; the lowest id wins when names repeat.
    pub fn ship_id(&self, name: &str) -> Option<i64> {
        self.ship_ids_by_name.get(name).copied()
    }

    /// Equipment id by display name; placeholder entries are not indexed.
    pub fn gear_id(&self, name: &str) -> Option<i64> {
        self.gear_ids_by_name.get(name).copied()
    }

    /// Display/equip category id by category name.
    pub fn category_id(&self, name: &str) -> Option<i64> {
        self.category_ids_by_name.get(name).copied()
    }
}
