//! The priority pass - recomputes every managed pawn × work-type priority.
//!
//! A pass runs to completion in one call:
//!
//! 1. Reset managed cells to disabled; unmanaged cells keep the host's value
//! 2. Specialists (doctor, hunter) at the most urgent priority
//! 3. Dedicated workers, in resolved-rule order
//! 4. Assign-everyone rules
//! 5. Passion, then learning-rate boosts for cells still disabled
//! 6. Leftover backfill: uncovered work types, then pawns with no work
//! 7. Idle pawns get every eligible work type at the idle priority
//! 8. Ensure-worker rules force the least-loaded eligible pawn in
//! 9. Commit changed cells and notify the host
//!
//! Later steps never make a cell less urgent.

use serde::{Deserialize, Serialize};

use autowork_logic::config::Settings;
use autowork_logic::constants::priorities::HIGHEST;
use autowork_logic::dedicated::{select_top, Candidate, PopulationCounts};
use autowork_logic::passion::PassionTier;
use autowork_logic::rules::ResolvedRuleSet;
use autowork_logic::work::WorkTypeId;

use crate::cache::{PawnSnapshot, SnapshotSources};
use crate::context::EngineContext;
use crate::error::EngineError;
use crate::host::ColonyHost;

use super::dedicated::{filtered_pawn_count, learning_rates, select_dedicated};
use super::eligibility::{row_of, Eligibility};
use super::specialists::{assign_specialists, hunting_work_type, owned_work_types};
use super::table::PriorityTable;

/// Outcome of one priority pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PassReport {
    /// Live roster pawns considered
    pub pawns: usize,
    pub work_types: usize,
    /// Cells whose committed value differs from before the pass
    pub changed_cells: usize,
    pub specialists: usize,
    pub dedicated: usize,
    pub everyone: usize,
    pub passion: usize,
    pub leftover: usize,
    pub idle: usize,
    pub ensured: usize,
    /// Ensure-worker work types left without anyone
    pub uncovered: Vec<String>,
}

/// Run a full priority pass against the live roster.
///
/// Fails without touching any pawn when the configuration is invalid.
pub fn run_priority_pass<H: ColonyHost + ?Sized>(
    ctx: &mut EngineContext,
    host: &mut H,
) -> Result<PassReport, EngineError> {
    ctx.prepare(host.work_types(), host.passions())?;

    let now = host.now();
    let hour = now.hour_index();
    let roster = host.roster();
    ctx.cache.retain_live(&roster);

    let pawns: Vec<PawnSnapshot> = {
        let sources = SnapshotSources {
            passions: &ctx.passions,
            bad_work: &ctx.compat.bad_work,
            management: &ctx.management,
            night_owl_trait: &ctx.settings.schedule.night_owl_trait,
        };
        roster
            .iter()
            .filter_map(|&pawn| {
                ctx.cache
                    .get_or_refresh(&*host, pawn, now.total_hours(), &sources)
                    .cloned()
            })
            .collect()
    };

    let Some(rules) = ctx.rules.as_ref() else {
        return Ok(PassReport::default());
    };
    let settings = &ctx.settings;
    let work_type_count = host.work_types().len();
    let managed_work_types = host
        .work_types()
        .iter()
        .filter(|wt| wt.visible && ctx.management.is_work_type_managed(&wt.name))
        .count();
    let owned = owned_work_types(settings, host.work_types());
    let eligibility = Eligibility::new(hunting_work_type(&owned), settings.allow_melee_hunters);
    let patients = host.patients();

    let mut report = PassReport {
        pawns: pawns.len(),
        work_types: work_type_count,
        ..Default::default()
    };

    // 1. Reset
    let mut table = PriorityTable::new(pawns.len(), work_type_count);
    for (row, pawn) in pawns.iter().enumerate() {
        for wt in work_type_ids(work_type_count) {
            if !is_managed(pawn, wt) {
                table.set(row, wt, ctx.compat.priorities.read(&*host, pawn.pawn, wt, hour));
            }
        }
    }

    // 2. Specialists
    report.specialists = assign_specialists(&pawns, &owned, rules, settings, &patients, &eligibility, &mut table);

    // 3. Dedicated workers
    let base_counts = PopulationCounts {
        managed_work_types,
        capable_pawns: pawns.iter().filter(|p| p.managed && p.capable).count(),
        filtered_pawns: 0,
    };
    for rule in rules.iter() {
        if owned.iter().any(|&(_, wt)| wt == rule.work_type) {
            continue;
        }
        let counts = PopulationCounts {
            filtered_pawns: filtered_pawn_count(&pawns, rule),
            ..base_counts
        };
        let rows = select_dedicated(&pawns, rule, &counts, settings, &eligibility, &table);
        if !rows.is_empty() {
            log::debug!(
                "Dedicated {}: {:?}",
                rule.name,
                rows.iter().map(|&r| pawns[r].pawn).collect::<Vec<_>>()
            );
        }
        for row in rows {
            if table.raise(row, rule.work_type, rule.dedicated.priority) {
                report.dedicated += 1;
            }
        }
    }

    // 4. Everyone
    for rule in rules.iter().filter(|r| r.assign_everyone) {
        for row in eligibility.candidates(&pawns, rule) {
            if table.raise(row, rule.work_type, rule.assign_everyone_priority) {
                report.everyone += 1;
            }
        }
    }

    // 5. Passion and learning rate
    for rule in rules.iter() {
        let rows = eligibility.candidates(&pawns, rule);
        let rates = learning_rates(&pawns, &rows, rule, settings);
        for (row, rate) in rows.into_iter().zip(rates) {
            let Some(cell) = pawns[row].work(rule.work_type) else {
                continue;
            };
            let priority = match ctx.passions.tier(cell.passion) {
                PassionTier::Major => Some(rule.major_passion_priority),
                PassionTier::Minor => Some(rule.minor_passion_priority),
                PassionTier::None => settings.learning.priority_for(rate),
            };
            if let Some(priority) = priority {
                if table.fill(row, rule.work_type, priority) {
                    report.passion += 1;
                }
            }
        }
    }

    // 6. Leftovers
    report.leftover += backfill_work_types(&pawns, rules, settings, &eligibility, &mut table);
    if settings.assign_idle_pawns {
        report.leftover += backfill_pawns(&pawns, rules, settings.leftover_priority, &eligibility, &mut table);
    }

    // 7. Idle pawns
    if settings.assign_idle_pawns {
        for (row, pawn) in pawns.iter().enumerate() {
            if !pawn.managed || !pawn.capable || table.active_count(row) > 0 || !host.is_idle(pawn.pawn) {
                continue;
            }
            for wt in work_type_ids(work_type_count) {
                if eligibility.basic(pawn, wt) && table.fill(row, wt, settings.idle_priority) {
                    report.idle += 1;
                }
            }
        }
    }

    // 8. Ensure a worker
    for rule in rules.iter().filter(|r| r.ensure_worker_assigned) {
        if table.assigned_count(rule.work_type) > 0 {
            continue;
        }
        let least_loaded = eligibility
            .candidates(&pawns, rule)
            .into_iter()
            .min_by_key(|&row| (table.active_count(row), pawns[row].pawn));
        match least_loaded {
            Some(row) => {
                table.raise(row, rule.work_type, HIGHEST);
                report.ensured += 1;
            }
            None => {
                log::warn!("No eligible pawn for {}; work type left uncovered", rule.name);
                report.uncovered.push(rule.name.clone());
            }
        }
    }

    // 9. Commit
    for (row, pawn) in pawns.iter().enumerate() {
        for wt in work_type_ids(work_type_count) {
            if !is_managed(pawn, wt) {
                continue;
            }
            let value = table.get(row, wt);
            if ctx.compat.priorities.read(&*host, pawn.pawn, wt, hour) != value {
                ctx.compat.priorities.write(&mut *host, pawn.pawn, wt, value);
                report.changed_cells += 1;
            }
        }
    }
    if report.changed_cells > 0 {
        host.notify_priorities_changed();
    }

    log::info!(
        "Work priorities updated: {} pawns, {} work types, {} changes",
        report.pawns,
        report.work_types,
        report.changed_cells
    );
    Ok(report)
}

fn work_type_ids(count: usize) -> impl Iterator<Item = WorkTypeId> {
    (0..count).map(|idx| WorkTypeId(idx as u16))
}

fn is_managed(pawn: &PawnSnapshot, work_type: WorkTypeId) -> bool {
    pawn.work(work_type).map(|c| c.managed).unwrap_or(false)
}

/// Give every work type nobody holds its best available pawn.
///
/// Ensure-worker work types are left to the ensure step.
fn backfill_work_types(
    pawns: &[PawnSnapshot],
    rules: &ResolvedRuleSet,
    settings: &Settings,
    eligibility: &Eligibility,
    table: &mut PriorityTable,
) -> usize {
    let mut assigned = 0;
    for rule in rules.iter() {
        if rule.ensure_worker_assigned || table.assigned_count(rule.work_type) > 0 {
            continue;
        }
        let rows = eligibility.candidates(pawns, rule);
        let rates = learning_rates(pawns, &rows, rule, settings);
        let candidates: Vec<Candidate> = rows
            .iter()
            .zip(rates)
            .filter_map(|(&row, learning_rate)| {
                let cell = pawns[row].work(rule.work_type)?;
                Some(Candidate {
                    pawn: pawns[row].pawn,
                    skill: cell.skill as f32,
                    passion: cell.passion_score,
                    learning_rate,
                    workload: table.active_count(row) as u32,
                })
            })
            .collect();
        let best = select_top(&candidates, 1, &settings.weights);
        if let Some(row) = best.first().and_then(|&pawn| row_of(pawns, pawn)) {
            if table.fill(row, rule.work_type, settings.leftover_priority) {
                log::debug!("Backfilled {} with {}", rule.name, pawns[row].pawn);
                assigned += 1;
            }
        }
    }
    assigned
}

/// Give every pawn without work the least contested work type it can do.
///
/// Ties go to the pawn's higher skill, then to resolved-rule order.
fn backfill_pawns(
    pawns: &[PawnSnapshot],
    rules: &ResolvedRuleSet,
    priority: u8,
    eligibility: &Eligibility,
    table: &mut PriorityTable,
) -> usize {
    let mut assigned = 0;
    for (row, pawn) in pawns.iter().enumerate() {
        if !pawn.managed || !pawn.capable || table.active_count(row) > 0 {
            continue;
        }
        let best = rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| eligibility.for_rule(pawn, rule))
            .min_by_key(|(order, rule)| {
                let skill = pawn.work(rule.work_type).map(|c| c.skill).unwrap_or(0);
                (table.assigned_count(rule.work_type), -skill, *order)
            })
            .map(|(_, rule)| rule);
        if let Some(rule) = best {
            if table.fill(row, rule.work_type, priority) {
                log::debug!("{} had no work, given {}", pawn.pawn, rule.name);
                assigned += 1;
            }
        }
    }
    assigned
}
