//! Which pawns and work types the engine is allowed to touch.
//!
//! Everything is managed unless excluded here. Exclusions are stored by
//! pawn id and work-type name so they survive catalog reordering, and are
//! persisted with the engine state.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use autowork_logic::pawn::PawnId;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManagementState {
    unmanaged_pawns: BTreeSet<PawnId>,
    unmanaged_work_types: BTreeSet<String>,
    unmanaged_cells: BTreeSet<(PawnId, String)>,
    unscheduled_pawns: BTreeSet<PawnId>,
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T, managed: bool) {
    if managed {
        set.remove(&value);
    } else {
        set.insert(value);
    }
}

impl ManagementState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pawn_managed(&self, pawn: PawnId) -> bool {
        !self.unmanaged_pawns.contains(&pawn)
    }

    pub fn set_pawn_managed(&mut self, pawn: PawnId, managed: bool) {
        toggle(&mut self.unmanaged_pawns, pawn, managed);
    }

    pub fn is_work_type_managed(&self, work_type: &str) -> bool {
        !self.unmanaged_work_types.contains(work_type)
    }

    pub fn set_work_type_managed(&mut self, work_type: &str, managed: bool) {
        toggle(&mut self.unmanaged_work_types, work_type.to_string(), managed);
    }

    /// Pawn, work type and the individual cell all managed.
    pub fn is_cell_managed(&self, pawn: PawnId, work_type: &str) -> bool {
        self.is_pawn_managed(pawn)
            && self.is_work_type_managed(work_type)
            && !self.unmanaged_cells.contains(&(pawn, work_type.to_string()))
    }

    pub fn set_cell_managed(&mut self, pawn: PawnId, work_type: &str, managed: bool) {
        toggle(&mut self.unmanaged_cells, (pawn, work_type.to_string()), managed);
    }

    pub fn is_schedule_managed(&self, pawn: PawnId) -> bool {
        self.is_pawn_managed(pawn) && !self.unscheduled_pawns.contains(&pawn)
    }

    pub fn set_schedule_managed(&mut self, pawn: PawnId, managed: bool) {
        toggle(&mut self.unscheduled_pawns, pawn, managed);
    }

    /// Drop exclusions of pawns that no longer exist.
    pub fn retain_pawns(&mut self, live: &[PawnId]) {
        let live: BTreeSet<PawnId> = live.iter().copied().collect();
        self.unmanaged_pawns.retain(|p| live.contains(p));
        self.unscheduled_pawns.retain(|p| live.contains(p));
        self.unmanaged_cells.retain(|(p, _)| live.contains(p));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_everything_managed_by_default() {
        let m = ManagementState::new();
        assert!(m.is_pawn_managed(PawnId(1)));
        assert!(m.is_cell_managed(PawnId(1), "Mining"));
        assert!(m.is_schedule_managed(PawnId(1)));
    }

    #[test]
    fn test_exclusions_cascade_to_cells() {
        let mut m = ManagementState::new();
        m.set_work_type_managed("Art", false);
        m.set_cell_managed(PawnId(2), "Mining", false);
        m.set_pawn_managed(PawnId(3), false);

        assert!(!m.is_cell_managed(PawnId(1), "Art"));
        assert!(!m.is_cell_managed(PawnId(2), "Mining"));
        assert!(m.is_cell_managed(PawnId(2), "Cooking"));
        assert!(!m.is_cell_managed(PawnId(3), "Cooking"));
        assert!(!m.is_schedule_managed(PawnId(3)));

        m.set_work_type_managed("Art", true);
        assert!(m.is_cell_managed(PawnId(1), "Art"));
    }

    #[test]
    fn test_retain_pawns_drops_stale_ids() {
        let mut m = ManagementState::new();
        m.set_pawn_managed(PawnId(1), false);
        m.set_cell_managed(PawnId(2), "Art", false);
        m.retain_pawns(&[PawnId(2)]);
        assert!(m.is_pawn_managed(PawnId(1)));
        assert!(!m.is_cell_managed(PawnId(2), "Art"));
    }
}
