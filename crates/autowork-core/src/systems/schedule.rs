//! Shift assignment - picks a daily schedule for every schedule-managed pawn.
//!
//! Pawns are placed one by one in roster order. Each pawn takes the shift
//! of its population tier that scores best against the pawns already
//! placed, so partners end up together and holders of the same work types
//! end up apart.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use autowork_logic::pawn::PawnId;
use autowork_logic::schedule::{best_shift, shift_score, tier_for};
use autowork_logic::work::WorkTypeId;

use crate::context::EngineContext;
use crate::host::ColonyHost;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleReport {
    pub pawns_scheduled: usize,
    /// Pawns per shift name
    pub shifts: BTreeMap<String, usize>,
}

struct Placed {
    pawn: PawnId,
    shift: String,
    priorities: Vec<u8>,
}

/// Assign shifts to every schedule-managed pawn on the live roster.
pub fn run_schedule_pass<H: ColonyHost + ?Sized>(ctx: &EngineContext, host: &mut H) -> ScheduleReport {
    let mut report = ScheduleReport::default();
    let settings = &ctx.settings.schedule;
    if !settings.enabled {
        return report;
    }

    let hour = host.now().hour_index();
    let roster = host.roster();
    let population = roster.len() as u32;
    let work_type_count = host.work_types().len();
    let mut placed: Vec<Placed> = Vec::with_capacity(roster.len());

    for &pawn in &roster {
        if !ctx.management.is_schedule_managed(pawn) {
            continue;
        }
        let night_owl = !settings.night_owl_trait.is_empty() && host.has_trait(pawn, &settings.night_owl_trait);
        let tiers = if night_owl && !settings.night_owl_tiers.is_empty() {
            &settings.night_owl_tiers
        } else {
            &settings.tiers
        };
        let Some(tier) = tier_for(tiers, population) else {
            continue;
        };

        let own: Vec<u8> = (0..work_type_count)
            .map(|idx| ctx.compat.priorities.read(&*host, pawn, WorkTypeId(idx as u16), hour))
            .collect();
        let partners = host.partners(pawn);

        let scores: Vec<f32> = tier
            .shifts
            .iter()
            .map(|shift| {
                let on_shift: Vec<&Placed> = placed.iter().filter(|p| p.shift == shift.name).collect();
                let partners_on_shift = on_shift.iter().filter(|p| partners.contains(&p.pawn)).count();
                let others: Vec<&[u8]> = on_shift.iter().map(|p| p.priorities.as_slice()).collect();
                shift_score(&own, partners_on_shift, &others)
            })
            .collect();
        let Some(best) = best_shift(&scores) else {
            continue;
        };
        let shift = &tier.shifts[best];

        host.set_schedule(pawn, &shift.hours);
        log::debug!("{} assigned to {} shift", pawn, shift.name);
        *report.shifts.entry(shift.name.clone()).or_default() += 1;
        report.pawns_scheduled += 1;
        placed.push(Placed {
            pawn,
            shift: shift.name.clone(),
            priorities: own,
        });
    }

    log::info!(
        "Schedules updated: {} pawns over {} shifts",
        report.pawns_scheduled,
        report.shifts.len()
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use autowork_logic::config::Settings;
    use autowork_logic::schedule::{ScheduleSettings, ShiftDef, ShiftTier, TimeAssignment};

    use crate::host::{Colony, PawnSpec};

    fn two_shifts() -> Settings {
        Settings {
            schedule: ScheduleSettings {
                tiers: vec![ShiftTier {
                    min_population: 0,
                    shifts: vec![ShiftDef::rotated("Day", 0), ShiftDef::rotated("Night", 12)],
                }],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_specialists_spread_over_shifts() {
        let mut colony = Colony::vanilla();
        let cook = colony.work_types().iter().position(|w| w.name == "Cooking").unwrap();
        let a = colony.spawn(PawnSpec::colonist("Ann"));
        let b = colony.spawn(PawnSpec::colonist("Bo"));
        colony.set_priority(a, WorkTypeId(cook as u16), 1);
        colony.set_priority(b, WorkTypeId(cook as u16), 1);

        let ctx = EngineContext::new(two_shifts());
        let report = run_schedule_pass(&ctx, &mut colony);
        assert_eq!(report.pawns_scheduled, 2);
        assert_eq!(report.shifts.get("Day"), Some(&1));
        assert_eq!(report.shifts.get("Night"), Some(&1));
    }

    #[test]
    fn test_partners_share_a_shift() {
        let mut colony = Colony::vanilla();
        let a = colony.spawn(PawnSpec::colonist("Ann"));
        let b = colony.spawn(PawnSpec::colonist("Bo"));
        colony.add_partners(a, b);

        let ctx = EngineContext::new(two_shifts());
        run_schedule_pass(&ctx, &mut colony);
        assert_eq!(colony.schedule_of(a), colony.schedule_of(b));
    }

    #[test]
    fn test_night_owls_use_their_tiers() {
        let mut colony = Colony::vanilla();
        let owl = colony.spawn(PawnSpec::colonist("Ann").with_trait("NightOwl"));
        let ctx = EngineContext::new(Settings::default());
        let report = run_schedule_pass(&ctx, &mut colony);
        assert_eq!(report.shifts.get("Owl"), Some(&1));
        let schedule = colony.schedule_of(owl).unwrap();
        assert_eq!(schedule.at(0), TimeAssignment::Work);
    }

    #[test]
    fn test_unmanaged_and_disabled() {
        let mut colony = Colony::vanilla();
        let a = colony.spawn(PawnSpec::colonist("Ann"));
        let mut ctx = EngineContext::new(Settings::default());
        ctx.set_schedule_managed(a, false);
        assert_eq!(run_schedule_pass(&ctx, &mut colony).pawns_scheduled, 0);

        let mut settings = Settings::default();
        settings.schedule.enabled = false;
        let ctx = EngineContext::new(settings);
        assert_eq!(run_schedule_pass(&ctx, &mut colony), ScheduleReport::default());
    }
}
