//! Vanilla reference data and the out-of-the-box rule set.

use crate::rules::AssignmentRule;
use crate::specialization::{SpecializationKind, SpecializationRule};
use crate::work::{WorkCatalog, WorkType};

pub mod skills {
    pub const SHOOTING: &str = "Shooting";
    pub const MELEE: &str = "Melee";
    pub const CONSTRUCTION: &str = "Construction";
    pub const MINING: &str = "Mining";
    pub const COOKING: &str = "Cooking";
    pub const PLANTS: &str = "Plants";
    pub const ANIMALS: &str = "Animals";
    pub const CRAFTING: &str = "Crafting";
    pub const ARTISTIC: &str = "Artistic";
    pub const MEDICINE: &str = "Medicine";
    pub const SOCIAL: &str = "Social";
    pub const INTELLECTUAL: &str = "Intellectual";

    pub const ALL: [&str; 12] = [
        SHOOTING,
        MELEE,
        CONSTRUCTION,
        MINING,
        COOKING,
        PLANTS,
        ANIMALS,
        CRAFTING,
        ARTISTIC,
        MEDICINE,
        SOCIAL,
        INTELLECTUAL,
    ];
}

/// The host's stock work types.
pub fn vanilla_work_types() -> WorkCatalog {
    use skills::*;
    [
        WorkType::new("Firefighter", 1400, &[]),
        WorkType::new("Patient", 1300, &[]),
        WorkType::new("Doctor", 1100, &[MEDICINE]),
        WorkType::new("PatientBedRest", 1350, &[]),
        WorkType::new("BasicWorker", 1200, &[]),
        WorkType::new("Warden", 1000, &[SOCIAL]),
        WorkType::new("Handling", 900, &[ANIMALS]),
        WorkType::new("Cooking", 800, &[COOKING]),
        WorkType::new("Hunting", 700, &[SHOOTING]),
        WorkType::new("Construction", 650, &[CONSTRUCTION]),
        WorkType::new("Growing", 600, &[PLANTS]),
        WorkType::new("Mining", 550, &[MINING]),
        WorkType::new("PlantCutting", 500, &[PLANTS]),
        WorkType::new("Smithing", 450, &[CRAFTING]),
        WorkType::new("Tailoring", 440, &[CRAFTING]),
        WorkType::new("Art", 400, &[ARTISTIC]),
        WorkType::new("Crafting", 350, &[CRAFTING]),
        WorkType::new("Hauling", 300, &[]),
        WorkType::new("Cleaning", 200, &[]),
        WorkType::new("Research", 100, &[INTELLECTUAL]),
    ]
    .into_iter()
    .collect()
}

fn everyone(work_type: &str, priority: u8) -> AssignmentRule {
    let mut rule = AssignmentRule::for_work_type(work_type);
    rule.assign_everyone = Some(true);
    rule.assign_everyone_priority = Some(priority);
    rule.dedicated.allow = Some(false);
    rule
}

/// Default rule plus the overrides that keep a fresh colony sane.
pub fn default_rules() -> Vec<AssignmentRule> {
    let mut firefighter = everyone("Firefighter", 1);
    firefighter.ensure_worker_assigned = Some(true);

    let mut doctor = AssignmentRule::for_work_type("Doctor");
    doctor.ensure_worker_assigned = Some(true);

    let mut hauling = everyone("Hauling", 4);
    hauling.dedicated.allow = Some(true);

    vec![
        AssignmentRule::default_rule(),
        firefighter,
        everyone("Patient", 1),
        everyone("PatientBedRest", 1),
        everyone("BasicWorker", 3),
        doctor,
        hauling,
        everyone("Cleaning", 4),
    ]
}

pub fn default_specializations() -> Vec<SpecializationRule> {
    vec![
        SpecializationRule::new(SpecializationKind::Doctor, "Doctor"),
        SpecializationRule::new(SpecializationKind::Hunter, "Hunting"),
    ]
}
