pub mod asw;
pub mod attributes;
pub mod names;
pub mod predicate;
pub mod profile;
pub mod torpedo;

pub use asw::{BonusContribution, Breakdown};
pub use attributes::{AttributeResolver, Capabilities, Capability};
pub use predicate::{Cond, NameRef};
pub use profile::AttackerProfile;

/// Which rule engine scores a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scorer {
    /// Sum of every rule's contribution (ASW).
    Additive,
    /// Minimum over per-slot candidates (TP).
    Minimum,
}

impl Scorer {
    pub fn score(self, unit: &AttackerProfile<'_>) -> i32 {
        match self {
            Scorer::Additive => asw::evaluate(unit),
            Scorer::Minimum => torpedo::evaluate(unit),
        }
    }

    /// CLI command name.
    pub fn command(self) -> &'static str {
        match self {
            Scorer::Additive => "asw",
            Scorer::Minimum => "tp",
        }
    }

    pub fn from_command(name: &str) -> Option<Self> {
        match name {
            "asw" => Some(Scorer::Additive),
            "tp" => Some(Scorer::Minimum),
            _ => None,
        }
    }
}
