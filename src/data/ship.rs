//! Ship catalog: one record per unit, plus the ship-type and ship-class tables
//! that turn the record's numeric codes into names and a nationality.

use serde::{Deserialize, Serialize};

/// Raw ship record. Field aliases accept the game's master export directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipRecord {
    #[serde(alias = "api_id")]
    pub id: i64,
    #[serde(alias = "api_name")]
    pub name: String,
    /// Phonetic reading; shared by every remodel of the same ship.
    #[serde(default, alias = "api_yomi")]
    pub yomi: String,
    /// Ship type code (destroyer, light carrier, ...).
    #[serde(default, alias = "api_stype")]
    pub stype: i64,
    /// Ship class code; also keys the nationality.
    #[serde(default, alias = "api_ctype")]
    pub ctype: i64,
    /// Last decimal digit encodes the remodel tier.
    #[serde(default, alias = "api_sort_id")]
    pub sort_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipTypeEntry {
    #[serde(alias = "api_id")]
    pub id: i64,
    #[serde(alias = "api_name")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipClassEntry {
    #[serde(alias = "ctype")]
    pub id: i64,
    pub name: String,
    pub nationality: String,
}

impl ShipRecord {
    /// Last digit of the sort id: 1 for the base form, 2..=5 for the first
    /// remodels, 6..=8 for second remodels.
    pub fn remodel_tier(&self) -> i64 {
        self.sort_id % 10
    }
}

/// A ship record with its codes resolved against the type and class tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitRecord<'a> {
    pub id: i64,
    pub name: &'a str,
    pub yomi: &'a str,
    pub ship_type: Option<&'a str>,
    pub class_name: Option<&'a str>,
    pub nationality: Option<&'a str>,
    pub remodel_tier: i64,
}
