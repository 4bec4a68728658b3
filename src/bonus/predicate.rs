//! Attacker predicates shared by both rule tables.

use crate::bonus::profile::AttackerProfile;

/// A condition on the attacking unit. Built in `static` rule tables, so every
/// variant holds only `'static` data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cond {
    Always,
    Class(&'static str),
    ClassIn(&'static [&'static str]),
    Name(&'static str),
    NameIn(&'static [&'static str]),
    NameContains(&'static str),
    Yomi(&'static str),
    YomiIn(&'static [&'static str]),
    Nation(&'static str),
    NationIn(&'static [&'static str]),
    Type(&'static str),
    TypeIn(&'static [&'static str]),
    /// Remodel tier in [2, 6).
    Remodel,
    /// Remodel tier in [6, 9).
    Remodel2,
    /// Remodel tier in [2, 9).
    RemodelOrAbove,
    All(&'static [Cond]),
    Not(&'static Cond),
}

/// A catalog name a condition refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NameRef {
    Class(&'static str),
    Ship(&'static str),
}

impl Cond {
    pub fn holds(&self, unit: &AttackerProfile<'_>) -> bool {
        match *self {
            Cond::Always => true,
            Cond::Class(name) => unit.class_name == name,
            Cond::ClassIn(names) => names.contains(&unit.class_name),
            Cond::Name(name) => unit.name == name,
            Cond::NameIn(names) => names.contains(&unit.name),
            Cond::NameContains(fragment) => !unit.has_error && unit.name.contains(fragment),
            Cond::Yomi(yomi) => unit.yomi == yomi,
            Cond::YomiIn(yomis) => yomis.contains(&unit.yomi),
            Cond::Nation(nation) => unit.nationality == nation,
            Cond::NationIn(nations) => nations.contains(&unit.nationality),
            Cond::Type(ship_type) => unit.ship_type == ship_type,
            Cond::TypeIn(types) => types.contains(&unit.ship_type),
            Cond::Remodel => unit.is_remodel(),
            Cond::Remodel2 => unit.is_remodel2(),
            Cond::RemodelOrAbove => unit.is_remodel_or_above(),
            Cond::All(conds) => conds.iter().all(|cond| cond.holds(unit)),
            Cond::Not(cond) => !cond.holds(unit),
        }
    }

    /// Report every class and ship name this condition compares against.
    pub fn visit_names(&self, visit: &mut impl FnMut(NameRef)) {
        match *self {
            Cond::Class(name) => visit(NameRef::Class(name)),
            Cond::ClassIn(names) => names.iter().for_each(|&name| visit(NameRef::Class(name))),
            Cond::Name(name) => visit(NameRef::Ship(name)),
            Cond::NameIn(names) => names.iter().for_each(|&name| visit(NameRef::Ship(name))),
            Cond::All(conds) => conds.iter().for_each(|cond| cond.visit_names(visit)),
            Cond::Not(cond) => cond.visit_names(visit),
            _ => {}
        }
    }
}
