//! Attacker Profile Builder: one unit plus its equipment, resolved once per row.

use std::collections::HashMap;

use crate::bonus::attributes::{AttributeResolver, Capabilities};
use crate::bonus::names::UNDEFINED;
use crate::data::{LooseNumber, MasterData};

/// One evaluated unit. Textual attributes of an unresolved unit (or a unit
/// whose class/type code has no table entry) read as [UNDEFINED].
#[derive(Debug, Clone)]
pub struct AttackerProfile<'a> {
    master: &'a MasterData,
    pub unit_id: i64,
    pub name: &'a str,
    pub yomi: &'a str,
    pub ship_type: &'a str,
    pub class_name: &'a str,
    pub nationality: &'a str,
    /// Last decimal digit of the unit's sort id; 0 when the unit is unresolved.
    pub remodel_tier: i64,
    /// Set when the unit id is not in the catalog.
    pub has_error: bool,
    pub capabilities: Capabilities,
    /// Refinement levels per held equipment id, in slot order. Empty slots
    /// (ids <= 0) are not recorded.
    equipment: HashMap<i64, Vec<i32>>,
    /// Every slot as given, empty ones included.
    slots: Vec<(i64, i32)>,
}

impl<'a> AttackerProfile<'a> {
    /// Build a profile. A slot without a matching refinement entry counts as
    /// refinement 0.
    pub fn build(
        resolver: &AttributeResolver<'a>,
        unit_id: &LooseNumber,
        equipment_ids: &[LooseNumber],
        refinement_levels: &[LooseNumber],
    ) -> Self {
        let master = resolver.master();
        let unit = master.unit(unit_id);

        let slots: Vec<(i64, i32)> = equipment_ids
            .iter()
            .enumerate()
            .map(|(index, id)| {
                let level = refinement_levels
                    .get(index)
                    .map(LooseNumber::truncate)
                    .unwrap_or(0);
                (id.as_id(), level)
            })
            .collect();

        let mut equipment: HashMap<i64, Vec<i32>> = HashMap::new();
        for &(id, level) in slots.iter().filter(|(id, _)| *id > 0) {
            equipment.entry(id).or_default().push(level);
        }

        let capabilities = resolver.capabilities(equipment.keys().copied());

        AttackerProfile {
            master,
            unit_id: unit_id.as_id(),
            name: unit.map_or(UNDEFINED, |unit| unit.name),
            yomi: unit.map_or(UNDEFINED, |unit| unit.yomi),
            ship_type: unit.and_then(|unit| unit.ship_type).unwrap_or(UNDEFINED),
            class_name: unit.and_then(|unit| unit.class_name).unwrap_or(UNDEFINED),
            nationality: unit.and_then(|unit| unit.nationality).unwrap_or(UNDEFINED),
            remodel_tier: unit.map_or(0, |unit| unit.remodel_tier),
            has_error: unit.is_none(),
            capabilities,
            equipment,
            slots,
        }
    }

    pub fn master(&self) -> &'a MasterData {
        self.master
    }

    pub fn is_remodel(&self) -> bool {
        (2..6).contains(&self.remodel_tier)
    }

    pub fn is_remodel2(&self) -> bool {
        (6..9).contains(&self.remodel_tier)
    }

    pub fn is_remodel_or_above(&self) -> bool {
        (2..9).contains(&self.remodel_tier)
    }

    /// Held copies of the named equipment; 0 for names the catalog lacks.
    pub fn count(&self, gear_name: &str) -> usize {
        self.refinements(gear_name).len()
    }

    /// Refinement levels of every held copy of the named equipment.
    pub fn refinements(&self, gear_name: &str) -> &[i32] {
        self.master
            .gear_id(gear_name)
            .and_then(|id| self.equipment.get(&id))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn slots(&self) -> &[(i64, i32)] {
        &self.slots
    }

    /// Distinct positive equipment ids held.
    pub fn equipment_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.equipment.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::gear::GearRecord;
    use crate::data::master::MasterFile;
    use crate::data::ship::{ShipClassEntry, ShipRecord, ShipTypeEntry};

    fn master() -> MasterData {
        MasterData::from_file(MasterFile {
            ships: vec![ShipRecord {
                id: 521,
                name: "鳳翔改二".to_string(),
                yomi: "ほうしょう".to_string(),
                stype: 7,
                ctype: 27,
                sort_id: 2736,
            }],
            ship_types: vec![ShipTypeEntry {
                id: 7,
                name: "軽空母".to_string(),
            }],
            ship_classes: vec![ShipClassEntry {
                id: 27,
                name: "鳳翔型".to_string(),
                nationality: "日本".to_string(),
            }],
            gears: vec![GearRecord {
                id: 19,
                name: "九六式艦戦".to_string(),
                kind: vec![3, 6, 6, 6, 0],
                saku: 0,
                sort_no: 19,
            }],
            ..MasterFile::default()
        })
    }

    fn loose(values: &[i64]) -> Vec<LooseNumber> {
        values.iter().map(|&v| LooseNumber::from(v)).collect()
    }

    #[test]
    fn resolved_unit_carries_names_and_remodel_flags() {
        let master = master();
        let resolver = AttributeResolver::new(&master);
        let profile = AttackerProfile::build(&resolver, &LooseNumber::from("521"), &[], &[]);
        assert!(!profile.has_error);
        assert_eq!(profile.class_name, "鳳翔型");
        assert_eq!(profile.ship_type, "軽空母");
        assert_eq!(profile.nationality, "日本");
        assert_eq!(profile.remodel_tier, 6);
        assert!(profile.is_remodel2());
        assert!(profile.is_remodel_or_above());
        assert!(!profile.is_remodel());
    }

    #[test]
    fn unresolved_unit_uses_sentinels() {
        let master = master();
        let resolver = AttributeResolver::new(&master);
        let profile = AttackerProfile::build(&resolver, &LooseNumber::from(9999), &[], &[]);
        assert!(profile.has_error);
        assert_eq!(profile.name, UNDEFINED);
        assert_eq!(profile.class_name, UNDEFINED);
        assert_eq!(profile.remodel_tier, 0);
        assert!(!profile.is_remodel_or_above());
    }

    #[test]
    fn empty_slots_are_dropped_and_refinements_keep_slot_order() {
        let master = master();
        let resolver = AttributeResolver::new(&master);
        let profile = AttackerProfile::build(
            &resolver,
            &LooseNumber::from(521),
            &loose(&[19, 0, -1, 19]),
            &loose(&[3, 0, 0, 7]),
        );
        assert_eq!(profile.count("九六式艦戦"), 2);
        assert_eq!(profile.refinements("九六式艦戦"), &[3, 7]);
        assert_eq!(profile.equipment_ids().collect::<Vec<_>>(), vec![19]);
        assert_eq!(profile.slots().len(), 4);
        assert_eq!(profile.count("unknown gear"), 0);
    }

    #[test]
    fn missing_refinement_reads_as_zero() {
        let master = master();
        let resolver = AttributeResolver::new(&master);
        let profile =
            AttackerProfile::build(&resolver, &LooseNumber::from(521), &loose(&[19, 19]), &loose(&[4]));
        assert_eq!(profile.refinements("九六式艦戦"), &[4, 0]);
    }
}
