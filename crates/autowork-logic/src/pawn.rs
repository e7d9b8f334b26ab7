//! Pawn identity and the facts rule filters are evaluated against.

use serde::{Deserialize, Serialize};

/// Stable host-assigned identifier of a pawn.
///
/// Also the final tie-breaker everywhere a ranking must be deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PawnId(pub u32);

impl std::fmt::Display for PawnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PawnClass {
    Colonist,
    Slave,
    Guest,
    Prisoner,
    Animal,
}

impl PawnClass {
    /// Classes that appear on the work roster.
    pub fn is_worker(&self) -> bool {
        matches!(self, PawnClass::Colonist | PawnClass::Slave | PawnClass::Guest)
    }
}

/// Primary weapon category, used for hunter eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Weapon {
    #[default]
    Unarmed,
    Melee,
    Ranged,
}

/// Per pawn × work type facts a rule filter inspects.
#[derive(Debug, Clone, Copy)]
pub struct PawnFacts {
    pub class: PawnClass,
    /// Injured or ill but still able to work.
    pub recovering: bool,
    /// Compatibility layer reports this work as bad for the pawn.
    pub work_is_bad: bool,
}
