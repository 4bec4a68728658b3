//! Attribute Resolver: equipment classification derived from the equipment
//! catalog's display category, picture-book category and search stat.
//!
//! Every predicate is false for an id the catalog does not contain.

use serde::Serialize;

use crate::bonus::names::{category, gear, picture_book};
use crate::data::MasterData;

/// Minimum search stat for a radar to count as a surface radar.
pub const SURFACE_RADAR_MIN_SAKU: i64 = 5;

/// Equipment classes a rule can require the unit to hold at least one of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    SurfaceRadar,
    ReconSeaplane,
    SeaplaneBomber,
    DomesticSonar,
    Autogyro,
    Helicopter,
    SpecialDepthCharge,
}

impl Capability {
    pub fn label(self) -> &'static str {
        match self {
            Capability::SurfaceRadar => "surface radar",
            Capability::ReconSeaplane => "recon seaplane",
            Capability::SeaplaneBomber => "seaplane bomber",
            Capability::DomesticSonar => "domestic sonar",
            Capability::Autogyro => "autogyro",
            Capability::Helicopter => "helicopter",
            Capability::SpecialDepthCharge => "special depth charge",
        }
    }
}

/// Capability flags of one unit's whole equipment set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub surface_radar: bool,
    pub recon_seaplane: bool,
    pub seaplane_bomber: bool,
    pub domestic_sonar: bool,
    pub autogyro: bool,
    pub helicopter: bool,
    pub special_depth_charge: bool,
}

impl Capabilities {
    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::SurfaceRadar => self.surface_radar,
            Capability::ReconSeaplane => self.recon_seaplane,
            Capability::SeaplaneBomber => self.seaplane_bomber,
            Capability::DomesticSonar => self.domestic_sonar,
            Capability::Autogyro => self.autogyro,
            Capability::Helicopter => self.helicopter,
            Capability::SpecialDepthCharge => self.special_depth_charge,
        }
    }
}

/// Resolves the category and equipment names the predicates need once, then
/// answers per-id questions against the catalog.
#[derive(Debug, Clone)]
pub struct AttributeResolver<'a> {
    master: &'a MasterData,
    radar_categories: Vec<i64>,
    recon_seaplane_category: Option<i64>,
    seaplane_bomber_category: Option<i64>,
    domestic_sonars: Vec<i64>,
    special_depth_charge: Option<i64>,
}

impl<'a> AttributeResolver<'a> {
    pub fn new(master: &'a MasterData) -> Self {
        let radar_categories = [
            category::SMALL_RADAR,
            category::LARGE_RADAR,
            category::LARGE_RADAR_II,
        ]
        .iter()
        .filter_map(|name| master.category_id(name))
        .collect();

        let domestic_sonars = [
            gear::TYPE93_PASSIVE_SONAR,
            gear::TYPE3_ACTIVE_SONAR,
            gear::TYPE0_PASSIVE_SONAR,
            gear::TYPE4_PASSIVE_SONAR,
            gear::TYPE3_ACTIVE_SONAR_KAI,
        ]
        .iter()
        .filter_map(|name| master.gear_id(name))
        .collect();

        AttributeResolver {
            master,
            radar_categories,
            recon_seaplane_category: master.category_id(category::RECON_SEAPLANE),
            seaplane_bomber_category: master.category_id(category::SEAPLANE_BOMBER),
            domestic_sonars,
            special_depth_charge: master.gear_id(gear::TYPE2_DEPTH_CHARGE),
        }
    }

    pub fn master(&self) -> &'a MasterData {
        self.master
    }

    fn category_of(&self, id: i64) -> Option<i64> {
        self.master.gear(id).and_then(|record| record.category())
    }

    fn picture_book_of(&self, id: i64) -> Option<i64> {
        self.master
            .gear(id)
            .and_then(|record| record.picture_book_category())
    }

    pub fn is_surface_radar(&self, id: i64) -> bool {
        let Some(record) = self.master.gear(id) else {
            return false;
        };
        record.saku >= SURFACE_RADAR_MIN_SAKU
            && record
                .category()
                .is_some_and(|category| self.radar_categories.contains(&category))
    }

    pub fn is_recon_seaplane(&self, id: i64) -> bool {
        self.recon_seaplane_category
            .is_some_and(|wanted| self.category_of(id) == Some(wanted))
    }

    pub fn is_seaplane_bomber(&self, id: i64) -> bool {
        self.seaplane_bomber_category
            .is_some_and(|wanted| self.category_of(id) == Some(wanted))
    }

    pub fn is_domestic_sonar(&self, id: i64) -> bool {
        self.domestic_sonars.contains(&id)
    }

    pub fn is_autogyro(&self, id: i64) -> bool {
        self.picture_book_of(id) == Some(picture_book::AUTOGYRO)
    }

    pub fn is_helicopter(&self, id: i64) -> bool {
        self.picture_book_of(id) == Some(picture_book::HELICOPTER)
    }

    pub fn is_special_depth_charge(&self, id: i64) -> bool {
        self.special_depth_charge == Some(id)
    }

    /// Flags over an equipment set; each flag is set when any id qualifies.
    pub fn capabilities<I>(&self, ids: I) -> Capabilities
    where
        I: IntoIterator<Item = i64>,
    {
        let mut flags = Capabilities::default();
        for id in ids {
            flags.surface_radar |= self.is_surface_radar(id);
            flags.recon_seaplane |= self.is_recon_seaplane(id);
            flags.seaplane_bomber |= self.is_seaplane_bomber(id);
            flags.domestic_sonar |= self.is_domestic_sonar(id);
            flags.autogyro |= self.is_autogyro(id);
            flags.helicopter |= self.is_helicopter(id);
            flags.special_depth_charge |= self.is_special_depth_charge(id);
        }
        flags
    }
}
