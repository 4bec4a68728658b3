//! Equipment catalog records and the equipment-category table.

use serde::{Deserialize, Serialize};

/// Position of the picture-book category in [GearRecord::kind].
pub const PICTURE_BOOK_INDEX: usize = 1;
/// Position of the display/equip category in [GearRecord::kind].
pub const CATEGORY_INDEX: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GearRecord {
    #[serde(alias = "api_id")]
    pub id: i64,
    #[serde(alias = "api_name")]
    pub name: String,
    /// Type tuple; see [PICTURE_BOOK_INDEX] and [CATEGORY_INDEX].
    #[serde(default, rename = "type", alias = "api_type")]
    pub kind: Vec<i64>,
    /// Search (line-of-sight) stat.
    #[serde(default, alias = "api_saku")]
    pub saku: i64,
    /// Zero marks a placeholder entry that no player can equip.
    #[serde(default, alias = "api_sortno")]
    pub sort_no: i64,
}

impl GearRecord {
    pub fn picture_book_category(&self) -> Option<i64> {
        self.kind.get(PICTURE_BOOK_INDEX).copied()
    }

    pub fn category(&self) -> Option<i64> {
        self.kind.get(CATEGORY_INDEX).copied()
    }

    pub fn is_equippable(&self) -> bool {
        self.sort_no != 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GearCategoryEntry {
    #[serde(alias = "api_id")]
    pub id: i64,
    #[serde(alias = "api_name")]
    pub name: String,
}
