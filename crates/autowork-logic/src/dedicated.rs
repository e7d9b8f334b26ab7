//! Dedicated-worker sizing and candidate scoring.
//!
//! A dedicated worker is a pawn picked to specialise in a work type. How
//! many are picked depends on the rule's [`DedicatedTarget`]; who is
//! picked depends on a weighted score:
//!
//! `skill * w_skill + passion * w_passion + learning_rate * w_learning - workload * w_workload`
//!
//! Workload is the number of other work types already assigned to the
//! pawn, so one talented pawn does not soak up every specialisation.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::constants::dedicated::{WEIGHT_MAX, WEIGHT_MIN};
use crate::pawn::PawnId;
use crate::rules::DedicatedTarget;

/// Population figures the ratio modes are based on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopulationCounts {
    /// Work types the engine manages.
    pub managed_work_types: usize,
    /// Managed pawns currently able to work.
    pub capable_pawns: usize,
    /// Pawns matching the `PawnCountRatio` sub-filter.
    pub filtered_pawns: usize,
}

/// Number of dedicated workers wanted for a work type.
pub fn target_count(target: &DedicatedTarget, counts: &PopulationCounts) -> usize {
    fn ratio(base: usize, factor: f32) -> usize {
        if base == 0 || !(factor > 0.0) {
            return 0;
        }
        (base as f32 * factor).ceil() as usize
    }

    match *target {
        DedicatedTarget::Constant(n) => n as usize,
        DedicatedTarget::WorkTypeCountRatio(factor) => ratio(counts.managed_work_types, factor),
        DedicatedTarget::CapablePawnRatio(factor) => ratio(counts.capable_pawns, factor),
        DedicatedTarget::PawnCountRatio { factor, .. } => ratio(counts.filtered_pawns, factor),
    }
}

/// Independent weights of the score terms, each in `0..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub skill: f32,
    pub passion: f32,
    pub learning_rate: f32,
    pub workload: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            skill: 1.0,
            passion: 2.0,
            learning_rate: 1.0,
            workload: 1.0,
        }
    }
}

impl ScoreWeights {
    pub fn clamp(&mut self) {
        for w in [
            &mut self.skill,
            &mut self.passion,
            &mut self.learning_rate,
            &mut self.workload,
        ] {
            *w = if w.is_nan() { WEIGHT_MIN } else { w.clamp(WEIGHT_MIN, WEIGHT_MAX) };
        }
    }
}

/// One eligible pawn's inputs for a work type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub pawn: PawnId,
    pub skill: f32,
    /// Normalized passion score (0..1).
    pub passion: f32,
    pub learning_rate: f32,
    /// Other work types already assigned to the pawn.
    pub workload: u32,
}

pub fn score(candidate: &Candidate, weights: &ScoreWeights) -> f32 {
    candidate.skill * weights.skill + candidate.passion * weights.passion
        + candidate.learning_rate * weights.learning_rate
        - candidate.workload as f32 * weights.workload
}

/// Descending score, ties broken by pawn id.
fn by_score_desc(a: &(f32, PawnId), b: &(f32, PawnId)) -> Ordering {
    b.0.partial_cmp(&a.0)
        .unwrap_or(Ordering::Equal)
        .then(a.1.cmp(&b.1))
}

/// Pick the `k` best candidates, best first.
pub fn select_top(candidates: &[Candidate], k: usize, weights: &ScoreWeights) -> Vec<PawnId> {
    if k == 0 {
        return Vec::new();
    }
    let mut scored: Vec<(f32, PawnId)> = candidates
        .iter()
        .map(|c| (score(c, weights), c.pawn))
        .collect();
    scored.sort_by(by_score_desc);
    scored.into_iter().take(k).map(|(_, pawn)| pawn).collect()
}
