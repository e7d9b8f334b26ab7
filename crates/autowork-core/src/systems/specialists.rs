//! Specialization pass: exclusive top-priority roles (doctor, hunter).
//!
//! Each enabled specialization names the work type it owns. The best
//! eligible pawns by skill, then passion, get that work type at the most
//! urgent priority. The dedicated-worker pass then leaves the owned work
//! type alone.

use autowork_logic::config::Settings;
use autowork_logic::constants::priorities::HIGHEST;
use autowork_logic::defs::DefBacked;
use autowork_logic::rules::ResolvedRuleSet;
use autowork_logic::specialization::{
    pick_specialists, PatientCounts, SpecialistCandidate, SpecializationKind,
};
use autowork_logic::work::{WorkCatalog, WorkCatalogExt, WorkTypeId};

use crate::cache::PawnSnapshot;

use super::eligibility::{row_of, Eligibility};
use super::table::PriorityTable;

/// Work types claimed by enabled specializations, in configuration order.
///
/// Specializations naming unknown work types are skipped with a warning;
/// a work type claimed twice keeps its first specialization.
pub fn owned_work_types(settings: &Settings, catalog: &WorkCatalog) -> Vec<(SpecializationKind, WorkTypeId)> {
    let mut owned: Vec<(SpecializationKind, WorkTypeId)> = Vec::new();
    for spec in settings.specializations.iter().filter(|s| s.enabled) {
        if spec.resolve(catalog).is_none() {
            log::warn!("{:?} specialization names unknown work type {}", spec.kind, spec.work_type);
            continue;
        }
        let Some(id) = catalog.id_of(&spec.work_type) else {
            continue;
        };
        if owned.iter().any(|&(_, wt)| wt == id) {
            continue;
        }
        owned.push((spec.kind, id));
    }
    owned
}

/// The hunter's work type, if a hunter specialization is active.
pub fn hunting_work_type(owned: &[(SpecializationKind, WorkTypeId)]) -> Option<WorkTypeId> {
    owned
        .iter()
        .find(|(kind, _)| *kind == SpecializationKind::Hunter)
        .map(|&(_, wt)| wt)
}

/// Assign specialists. Returns the number of cells set.
pub fn assign_specialists(
    pawns: &[PawnSnapshot],
    owned: &[(SpecializationKind, WorkTypeId)],
    rules: &ResolvedRuleSet,
    settings: &Settings,
    patients: &PatientCounts,
    eligibility: &Eligibility,
    table: &mut PriorityTable,
) -> usize {
    let mut assigned = 0;

    for &(kind, work_type) in owned {
        let Some(rule) = rules.get(work_type) else {
            continue;
        };
        let candidates: Vec<SpecialistCandidate> = eligibility
            .candidates(pawns, rule)
            .into_iter()
            .filter_map(|row| {
                let cell = pawns[row].work(work_type)?;
                Some(SpecialistCandidate {
                    pawn: pawns[row].pawn,
                    skill: cell.skill,
                    passion: cell.passion_score,
                })
            })
            .collect();

        let wanted = match kind {
            SpecializationKind::Doctor => settings.doctors.doctors_needed(patients),
            SpecializationKind::Hunter => 1,
        };

        let picked = pick_specialists(&candidates, wanted);
        if picked.is_empty() {
            log::debug!("No eligible pawn for {:?} ({})", kind, rule.name);
            continue;
        }
        for pawn in &picked {
            if let Some(row) = row_of(pawns, *pawn) {
                if table.raise(row, work_type, HIGHEST) {
                    assigned += 1;
                }
            }
        }
        log::debug!("{:?} specialists for {}: {:?}", kind, rule.name, picked);
    }

    assigned
}
