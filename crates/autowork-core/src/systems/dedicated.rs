//! Dedicated-worker selection for one work type.

use autowork_logic::config::Settings;
use autowork_logic::dedicated::{select_top, target_count, Candidate, PopulationCounts};
use autowork_logic::learning::normalize_all;
use autowork_logic::rules::{DedicatedTarget, ResolvedRule};

use crate::cache::PawnSnapshot;

use super::eligibility::{row_of, Eligibility};
use super::table::PriorityTable;

/// Learning rate of each candidate row for the rule's work type,
/// normalized across the candidates when configured.
pub fn learning_rates(pawns: &[PawnSnapshot], rows: &[usize], rule: &ResolvedRule, settings: &Settings) -> Vec<f32> {
    let raw: Vec<f32> = rows
        .iter()
        .map(|&row| {
            pawns[row]
                .work(rule.work_type)
                .map(|c| c.learning_rate)
                .unwrap_or(0.0)
        })
        .collect();
    if settings.learning.use_normalized {
        normalize_all(&raw)
    } else {
        raw
    }
}

/// Managed pawns matching the `PawnCountRatio` sub-filter.
pub fn filtered_pawn_count(pawns: &[PawnSnapshot], rule: &ResolvedRule) -> usize {
    match rule.dedicated.target {
        DedicatedTarget::PawnCountRatio { filter, .. } => pawns
            .iter()
            .filter(|p| p.managed && filter.allows(&p.facts(rule.work_type)))
            .count(),
        _ => 0,
    }
}

/// Rows of the pawns to dedicate to the rule's work type, best first.
///
/// Pure selection; `table` is only read for current workloads.
pub fn select_dedicated(
    pawns: &[PawnSnapshot],
    rule: &ResolvedRule,
    counts: &PopulationCounts,
    settings: &Settings,
    eligibility: &Eligibility,
    table: &PriorityTable,
) -> Vec<usize> {
    if !rule.dedicated.allow {
        return Vec::new();
    }
    let k = target_count(&rule.dedicated.target, counts);
    if k == 0 {
        return Vec::new();
    }

    let rows = eligibility.candidates(pawns, rule);
    let rates = learning_rates(pawns, &rows, rule, settings);
    let candidates: Vec<Candidate> = rows
        .iter()
        .zip(rates)
        .filter_map(|(&row, learning_rate)| {
            let cell = pawns[row].work(rule.work_type)?;
            let others = table.active_count(row) - usize::from(table.get(row, rule.work_type) != 0);
            Some(Candidate {
                pawn: pawns[row].pawn,
                skill: cell.skill as f32,
                passion: cell.passion_score,
                learning_rate,
                workload: others as u32,
            })
        })
        .collect();

    select_top(&candidates, k, &settings.weights)
        .into_iter()
        .filter_map(|pawn| row_of(pawns, pawn))
        .collect()
}
