//! Exclusive high-priority roles: doctors and hunters.
//!
//! A specialization claims its work type before dedicated workers are
//! chosen. The best-skilled eligible pawn(s) get priority 1; ties go to
//! the stronger passion, then the lower pawn id.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::defs::DefBacked;
use crate::pawn::{PawnId, Weapon};
use crate::work::WorkType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecializationKind {
    Doctor,
    Hunter,
}

/// Binds a specialization to a work type by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecializationRule {
    pub kind: SpecializationKind,
    pub work_type: String,
    pub enabled: bool,
}

impl SpecializationRule {
    pub fn new(kind: SpecializationKind, work_type: &str) -> Self {
        Self {
            kind,
            work_type: work_type.to_string(),
            enabled: true,
        }
    }
}

impl DefBacked for SpecializationRule {
    type Def = WorkType;

    fn def_ref(&self) -> Option<&str> {
        Some(&self.work_type)
    }
}

/// Which incapacitated pawns create demand for extra doctors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorPolicy {
    pub assign_multiple: bool,
    pub count_colonists: bool,
    pub count_guests: bool,
    pub count_prisoners: bool,
    pub count_animals: bool,
}

impl Default for DoctorPolicy {
    fn default() -> Self {
        Self {
            assign_multiple: true,
            count_colonists: true,
            count_guests: true,
            count_prisoners: false,
            count_animals: false,
        }
    }
}

/// Pawns currently needing treatment, by class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientCounts {
    pub colonists: usize,
    pub guests: usize,
    pub prisoners: usize,
    pub animals: usize,
}

impl DoctorPolicy {
    pub fn counted_patients(&self, patients: &PatientCounts) -> usize {
        let mut total = 0;
        if self.count_colonists {
            total += patients.colonists;
        }
        if self.count_guests {
            total += patients.guests;
        }
        if self.count_prisoners {
            total += patients.prisoners;
        }
        if self.count_animals {
            total += patients.animals;
        }
        total
    }

    /// Doctors wanted: one per counted patient when multiple doctors are
    /// allowed, never fewer than one.
    pub fn doctors_needed(&self, patients: &PatientCounts) -> usize {
        if self.assign_multiple {
            self.counted_patients(patients).max(1)
        } else {
            1
        }
    }
}

/// Whether a pawn carrying `weapon` may be made the hunter.
///
/// Unarmed pawns are treated like melee pawns.
pub fn can_hunt_with(weapon: Weapon, allow_melee: bool) -> bool {
    match weapon {
        Weapon::Ranged => true,
        Weapon::Melee | Weapon::Unarmed => allow_melee,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecialistCandidate {
    pub pawn: PawnId,
    pub skill: i32,
    pub passion: f32,
}

fn specialist_order(a: &SpecialistCandidate, b: &SpecialistCandidate) -> Ordering {
    b.skill
        .cmp(&a.skill)
        .then(b.passion.partial_cmp(&a.passion).unwrap_or(Ordering::Equal))
        .then(a.pawn.cmp(&b.pawn))
}

/// Best `count` candidates: skill, then passion, then pawn id.
pub fn pick_specialists(candidates: &[SpecialistCandidate], count: usize) -> Vec<PawnId> {
    let mut ranked = candidates.to_vec();
    ranked.sort_by(specialist_order);
    ranked.into_iter().take(count).map(|c| c.pawn).collect()
}
