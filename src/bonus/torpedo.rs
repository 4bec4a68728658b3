//! Per-slot (TP) rule engine.
//!
//! Each of the first [SLOT_COUNT] slots is scored on its own: the first rule
//! naming the slot's equipment whose branch holds gives the slot a candidate.
//! The unit's bonus is the smallest candidate, or 0 when no slot has one.

use crate::bonus::names::{class, gear, nation, ship_type};
use crate::bonus::predicate::Cond;
use crate::bonus::predicate::Cond::{
    All, Class, Name, NameContains, NameIn, Nation, Remodel2, RemodelOrAbove, TypeIn,
};
use crate::bonus::profile::AttackerProfile;

pub const SLOT_COUNT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotExtra {
    If(Cond, i32),
    /// `(threshold, value)`: added when this slot's refinement reaches the threshold.
    RefinementAtLeast(i32, i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotBranch {
    pub when: Cond,
    pub base: i32,
    pub extras: &'static [SlotExtra],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRule {
    pub gear: &'static str,
    /// First-match chain.
    pub branches: &'static [SlotBranch],
}

impl SlotRule {
    /// Candidate for a slot holding this rule's equipment at `level`.
    pub fn candidate(&self, unit: &AttackerProfile<'_>, level: i32) -> Option<i32> {
        let branch = self.branches.iter().find(|branch| branch.when.holds(unit))?;
        let extras: i32 = branch
            .extras
            .iter()
            .map(|extra| match *extra {
                SlotExtra::If(cond, value) if cond.holds(unit) => value,
                SlotExtra::RefinementAtLeast(threshold, value) if level >= threshold => value,
                _ => 0,
            })
            .sum();
        Some(branch.base + extras)
    }

    pub fn conditions(&self) -> impl Iterator<Item = &'static Cond> {
        let branches: &'static [SlotBranch] = self.branches;
        branches.iter().flat_map(|branch| {
            std::iter::once(&branch.when).chain(branch.extras.iter().filter_map(|extra| {
                match extra {
                    SlotExtra::If(cond, _) => Some(cond),
                    SlotExtra::RefinementAtLeast(..) => None,
                }
            }))
        })
    }
}

/// Candidate per slot. Slots past [SLOT_COUNT] are ignored; missing slots
/// are empty.
pub fn slot_candidates(unit: &AttackerProfile<'_>) -> [Option<i32>; SLOT_COUNT] {
    let master = unit.master();
    let mut candidates = [None; SLOT_COUNT];
    for (candidate, &(id, level)) in candidates.iter_mut().zip(unit.slots()) {
        if id <= 0 {
            continue;
        }
        *candidate = RULES
            .iter()
            .filter(|rule| master.gear_id(rule.gear) == Some(id))
            .find_map(|rule| rule.candidate(unit, level));
    }
    candidates
}

/// Per-slot minimum bonus of one unit.
pub fn evaluate(unit: &AttackerProfile<'_>) -> i32 {
    slot_candidates(unit).into_iter().flatten().min().unwrap_or(0)
}

const fn branch(when: Cond, base: i32, extras: &'static [SlotExtra]) -> SlotBranch {
    SlotBranch { when, base, extras }
}

const BRITISH_CARRIER: Cond = All(&[Nation(nation::UK), TypeIn(ship_type::CARRIERS)]);
const RYUHO_KAI2_EXTRAS: &[SlotExtra] = &[
    SlotExtra::If(Name("龍鳳改二"), 1),
    SlotExtra::If(Name("龍鳳改二戊"), 2),
];
const SUZUYA_KUMANO_CARRIERS: &[&str] = &["鈴谷航改二", "熊野航改二"];

/// The per-slot rule table, in authored order.
pub static RULES: &[SlotRule] = &[
    SlotRule {
        gear: gear::SWORDFISH_MK3_KAI_FLOATPLANE,
        branches: &[branch(Name("Gotoland andra"), 2, &[])],
    },
    SlotRule {
        gear: gear::SWORDFISH_MK3_KAI_FLOATPLANE_SKILLED,
        branches: &[branch(Name("Gotoland andra"), 3, &[])],
    },
    SlotRule {
        gear: gear::TENZAN_12A,
        branches: &[
            branch(All(&[Class(class::SHOHO), Remodel2]), 1, &[]),
            branch(Class(class::SHOKAKU), 1, &[]),
            branch(Class(class::TAIHO), 1, &[]),
            branch(
                Class(class::RYUHO),
                0,
                &[SlotExtra::If(RemodelOrAbove, 1), SlotExtra::If(Remodel2, 1)],
            ),
        ],
    },
    SlotRule {
        gear: gear::TENZAN_12A_KAI_RADAR,
        branches: &[
            branch(All(&[Class(class::SHOHO), RemodelOrAbove]), 1, &[]),
            branch(Class(class::RYUHO), 1, RYUHO_KAI2_EXTRAS),
            branch(All(&[Class(class::CHITOSE), NameContains("航改")]), 1, &[]),
            branch(Class(class::HIYO), 1, &[]),
            branch(Class(class::SHOKAKU), 2, &[]),
            branch(Class(class::TAIHO), 2, &[]),
            branch(NameIn(SUZUYA_KUMANO_CARRIERS), 2, &[]),
        ],
    },
    SlotRule {
        gear: gear::TENZAN_12A_KAI_SKILLED_RADAR,
        branches: &[
            branch(All(&[Class(class::SHOHO), RemodelOrAbove]), 1, &[]),
            branch(Class(class::RYUHO), 1, RYUHO_KAI2_EXTRAS),
            branch(Class(class::CHITOSE), 1, &[]),
            branch(Class(class::HIYO), 2, &[]),
            branch(Class(class::SHOKAKU), 3, &[]),
            branch(Class(class::TAIHO), 3, &[]),
            branch(NameIn(SUZUYA_KUMANO_CARRIERS), 2, &[]),
        ],
    },
    SlotRule {
        gear: gear::BARRACUDA_MK2,
        branches: &[branch(BRITISH_CARRIER, 3, &[])],
    },
    SlotRule {
        gear: gear::BARRACUDA_MK3,
        branches: &[branch(
            BRITISH_CARRIER,
            1,
            &[SlotExtra::RefinementAtLeast(8, 1)],
        )],
    },
];
