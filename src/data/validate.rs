use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::bonus::names::{category, gear};
use crate::bonus::{asw, torpedo, NameRef};
use crate::data::master::{is_sorted_by_key, Keyed, MasterFile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }

    pub fn count(&self, severity: ValidationSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity == severity)
            .count()
    }
}

/// Names the attribute resolver looks up outside the rule tables.
const RESOLVER_GEARS: &[&str] = &[
    gear::TYPE93_PASSIVE_SONAR,
    gear::TYPE3_ACTIVE_SONAR,
    gear::TYPE0_PASSIVE_SONAR,
    gear::TYPE4_PASSIVE_SONAR,
    gear::TYPE3_ACTIVE_SONAR_KAI,
    gear::TYPE2_DEPTH_CHARGE,
];

const RESOLVER_CATEGORIES: &[&str] = &[
    category::SMALL_RADAR,
    category::LARGE_RADAR,
    category::LARGE_RADAR_II,
    category::RECON_SEAPLANE,
    category::SEAPLANE_BOMBER,
];

/// Check a master file for problems that would silently change bonuses:
/// duplicate ids, unsorted catalogs, and names the rule tables reference but
/// the catalog lacks (those rules can never fire).
pub fn validate_master(file: &MasterFile) -> ValidationReport {
    let mut report = ValidationReport::default();

    check_catalog(&mut report, "ships", &file.ships);
    check_catalog(&mut report, "ship_types", &file.ship_types);
    check_catalog(&mut report, "ship_classes", &file.ship_classes);
    check_catalog(&mut report, "gears", &file.gears);
    check_catalog(&mut report, "gear_categories", &file.gear_categories);

    let gear_names: HashSet<&str> = file
        .gears
        .iter()
        .filter(|record| record.is_equippable())
        .map(|record| record.name.as_str())
        .collect();
    let category_names: HashSet<&str> = file
        .gear_categories
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    let class_names: HashSet<&str> = file
        .ship_classes
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    let ship_names: HashSet<&str> = file.ships.iter().map(|ship| ship.name.as_str()).collect();

    let mut wanted_gears = BTreeSet::new();
    let mut wanted_names = BTreeSet::new();
    for rule in asw::RULES {
        wanted_gears.extend(rule.gear_names());
        rule.conditions()
            .for_each(|cond| cond.visit_names(&mut |name| {
                wanted_names.insert(name);
            }));
    }
    for rule in torpedo::RULES {
        wanted_gears.insert(rule.gear);
        rule.conditions()
            .for_each(|cond| cond.visit_names(&mut |name| {
                wanted_names.insert(name);
            }));
    }
    wanted_gears.extend(RESOLVER_GEARS.iter().copied());

    for name in wanted_gears {
        if !gear_names.contains(name) {
            report.push(
                ValidationSeverity::Warning,
                "gears",
                format!("no equippable entry named '{name}'"),
            );
        }
    }
    for name in RESOLVER_CATEGORIES {
        if !category_names.contains(name) {
            report.push(
                ValidationSeverity::Warning,
                "gear_categories",
                format!("no category named '{name}'"),
            );
        }
    }
    for name in wanted_names {
        match name {
            NameRef::Class(class) if !class_names.contains(class) => report.push(
                ValidationSeverity::Warning,
                "ship_classes",
                format!("no class named '{class}'"),
            ),
            NameRef::Ship(ship) if !ship_names.contains(ship) => report.push(
                ValidationSeverity::Warning,
                "ships",
                format!("no ship named '{ship}'"),
            ),
            _ => {}
        }
    }

    let unresolved = report.count(ValidationSeverity::Warning);
    if unresolved > 0 {
        warn!(warnings = unresolved, "master data validation produced warnings");
    }

    if let Some(version) = &file.data_version {
        report.push(
            ValidationSeverity::Info,
            "master",
            format!("data_version {version}"),
        );
    }

    report
}

fn check_catalog<T: Keyed>(report: &mut ValidationReport, name: &str, catalog: &[T]) {
    let mut seen = HashSet::with_capacity(catalog.len());
    for record in catalog {
        if !seen.insert(record.key()) {
            report.push(
                ValidationSeverity::Error,
                name,
                format!("duplicate id {}", record.key()),
            );
        }
    }
    if !is_sorted_by_key(catalog) {
        report.push(
            ValidationSeverity::Warning,
            name,
            "not sorted ascending by id; it will be sorted on load",
        );
    }
}
