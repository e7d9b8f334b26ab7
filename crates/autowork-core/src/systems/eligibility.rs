//! Who may be given a work type at all.

use autowork_logic::pawn::PawnId;
use autowork_logic::rules::ResolvedRule;
use autowork_logic::specialization::can_hunt_with;
use autowork_logic::work::WorkTypeId;

use crate::cache::PawnSnapshot;

/// Eligibility checks shared by every step of a pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct Eligibility {
    /// Work type owned by the hunter specialization
    pub hunting: Option<WorkTypeId>,
    pub allow_melee_hunters: bool,
}

impl Eligibility {
    pub fn new(hunting: Option<WorkTypeId>, allow_melee_hunters: bool) -> Self {
        Self {
            hunting,
            allow_melee_hunters,
        }
    }

    /// Capable, managed, not incapable, and carrying a suitable weapon for
    /// hunting.
    pub fn can_take(&self, pawn: &PawnSnapshot, work_type: WorkTypeId) -> bool {
        let Some(cell) = pawn.work(work_type) else {
            return false;
        };
        if !pawn.capable || !cell.managed || cell.incapable {
            return false;
        }
        if self.hunting == Some(work_type) {
            return can_hunt_with(pawn.weapon, self.allow_melee_hunters);
        }
        true
    }

    /// [`Self::can_take`] without work the pawn considers bad. Rule
    /// filters are not consulted.
    pub fn basic(&self, pawn: &PawnSnapshot, work_type: WorkTypeId) -> bool {
        self.can_take(pawn, work_type) && pawn.work(work_type).map(|c| !c.bad_work).unwrap_or(false)
    }

    /// [`Self::can_take`] and the rule's pawn filter.
    pub fn for_rule(&self, pawn: &PawnSnapshot, rule: &ResolvedRule) -> bool {
        self.can_take(pawn, rule.work_type) && rule.filter.allows(&pawn.facts(rule.work_type))
    }

    /// Rows of `pawns` eligible under `rule`, in roster order.
    pub fn candidates(&self, pawns: &[PawnSnapshot], rule: &ResolvedRule) -> Vec<usize> {
        pawns
            .iter()
            .enumerate()
            .filter(|(_, p)| self.for_rule(p, rule))
            .map(|(row, _)| row)
            .collect()
    }
}

/// Row of a pawn id in the roster.
pub fn row_of(pawns: &[PawnSnapshot], pawn: PawnId) -> Option<usize> {
    pawns.iter().position(|p| p.pawn == pawn)
}
