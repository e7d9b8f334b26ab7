//! End-to-end passes against the hecs reference colony.

use autowork_core::generation::{generate_colony, ColonyConfig};
use autowork_core::prelude::*;
use autowork_logic::passion::PassionId;
use autowork_logic::rules::{AssignmentRule, DedicatedMode, RuleError};
use autowork_logic::work::{WorkCatalog, WorkCatalogExt, WorkType};

/// Settings where only the rules a test configures produce assignments:
/// no default dedicated workers, no specialists, no learning boosts, no
/// schedules.
fn isolated_settings() -> Settings {
    let mut settings = Settings::default();
    for rule in settings.rules.iter_mut().filter(|r| r.is_default()) {
        rule.dedicated.allow = Some(false);
    }
    for spec in &mut settings.specializations {
        spec.enabled = false;
    }
    settings.learning.enabled = false;
    settings.schedule.enabled = false;
    settings
}

fn work_type(colony: &Colony, name: &str) -> WorkTypeId {
    colony.work_types().id_of(name).unwrap()
}

fn column(colony: &Colony, pawns: &[PawnId], name: &str) -> Vec<u8> {
    let wt = work_type(colony, name);
    pawns.iter().map(|&p| colony.priority(p, wt)).collect()
}

fn all_priorities(colony: &Colony) -> Vec<Vec<u8>> {
    colony.roster().into_iter().map(|p| colony.priorities_of(p)).collect()
}

#[test]
fn test_constant_mode_takes_top_two() {
    let mut settings = isolated_settings();
    let mining = settings.rule_for_mut("Mining");
    mining.dedicated.allow = Some(true);
    mining.dedicated.set_mode(DedicatedMode::Constant);
    mining.dedicated.constant_count = Some(2);

    let mut colony = Colony::vanilla();
    let pawns: Vec<PawnId> = [5, 9, 1, 7, 3]
        .iter()
        .map(|&level| colony.spawn(PawnSpec::colonist("Miner").skill("Mining", level, PassionId::NONE)))
        .collect();

    let mut engine = WorkEngine::new(settings);
    let outcome = engine.update(&mut colony).unwrap();

    assert_eq!(column(&colony, &pawns, "Mining"), vec![0, 1, 0, 1, 0]);
    assert!(outcome.priorities.unwrap().dedicated >= 2);
}

#[test]
fn test_assign_everyone_skips_filtered_pawns() {
    let mut colony = Colony::vanilla();
    let mut pawns: Vec<PawnId> = ["Ann", "Bo", "Cy"]
        .iter()
        .map(|name| colony.spawn(PawnSpec::colonist(name)))
        .collect();
    pawns.push(colony.spawn(PawnSpec::new("Visitor", PawnClass::Guest)));

    let mut engine = WorkEngine::new(Settings::default());
    engine.update(&mut colony).unwrap();

    assert_eq!(column(&colony, &pawns, "Cleaning"), vec![4, 4, 4, 0]);
}

#[test]
fn test_leftover_backfill_covers_art() {
    let mut settings = isolated_settings();
    settings.leftover_priority = 4;

    let mut colony = Colony::vanilla();
    let artist = colony.spawn(PawnSpec::colonist("Ann").skill("Artistic", 5, PassionId::NONE));

    let mut engine = WorkEngine::new(settings);
    let report = engine.force_update(&mut colony).unwrap().priorities.unwrap();

    assert_eq!(column(&colony, &[artist], "Art"), vec![4]);
    assert!(report.leftover > 0);
}

#[test]
fn test_cadence_gate() {
    let mut settings = Settings::default();
    settings.updates_per_day = 2;
    settings.schedule.enabled = false;

    let mut colony = Colony::vanilla();
    colony.spawn(PawnSpec::colonist("Ann"));
    let mut engine = WorkEngine::new(settings);
    assert!(engine.update(&mut colony).unwrap().priorities.is_some());
    let notifications = colony.priority_notifications();

    colony.advance(6.0);
    let late = colony.spawn(PawnSpec::colonist("Bo"));
    assert!(engine.update(&mut colony).unwrap().is_noop());
    assert!(colony.priorities_of(late).iter().all(|&p| p == 0));
    assert_eq!(colony.priority_notifications(), notifications);

    colony.advance(6.0);
    assert!(engine.update(&mut colony).unwrap().priorities.is_some());
    assert!(colony.priorities_of(late).iter().any(|&p| p > 0));
}

#[test]
fn test_second_pass_changes_nothing() {
    let mut colony = generate_colony(&ColonyConfig {
        seed: 3,
        colonists: 12,
        ..ColonyConfig::default()
    });
    let mut engine = WorkEngine::default();

    let first = engine.force_update(&mut colony).unwrap().priorities.unwrap();
    assert!(first.changed_cells > 0);
    let before = all_priorities(&colony);

    let second = engine.force_update(&mut colony).unwrap().priorities.unwrap();
    assert_eq!(second.changed_cells, 0);
    assert_eq!(all_priorities(&colony), before);
}

#[test]
fn test_unmanaged_priorities_untouched() {
    let mut colony = generate_colony(&ColonyConfig::default());
    let roster = colony.roster();
    let (manual, partial) = (roster[0], roster[1]);
    let art = work_type(&colony, "Art");
    let cooking = work_type(&colony, "Cooking");

    let count = colony.work_types().len();
    for idx in 0..count {
        colony.set_priority(manual, WorkTypeId(idx as u16), 2);
    }
    colony.set_priority(partial, cooking, 3);
    for &pawn in &roster {
        colony.set_priority(pawn, art, 4);
    }

    let mut engine = WorkEngine::default();
    let ctx = engine.context_mut();
    ctx.set_pawn_managed(manual, false);
    ctx.set_cell_managed(partial, "Cooking", false);
    ctx.set_work_type_managed("Art", false);
    engine.force_update(&mut colony).unwrap();

    assert_eq!(colony.priorities_of(manual), vec![2; count]);
    assert_eq!(colony.priority(partial, cooking), 3);
    assert!(roster.iter().all(|&p| colony.priority(p, art) == 4));
}

#[test]
fn test_ensure_worker_coverage() {
    let mut settings = isolated_settings();
    settings.rule_for_mut("Research").ensure_worker_assigned = Some(true);

    let mut colony = Colony::vanilla();
    let pawns: Vec<PawnId> = ["Ann", "Bo", "Cy"]
        .iter()
        .map(|name| colony.spawn(PawnSpec::colonist(name).skill("Intellectual", 4, PassionId::NONE)))
        .collect();

    let mut engine = WorkEngine::new(settings);
    let report = engine.force_update(&mut colony).unwrap().priorities.unwrap();

    let research = column(&colony, &pawns, "Research");
    assert_eq!(research.iter().filter(|&&p| p > 0).count(), 1);
    assert!(research.contains(&1));
    assert!(report.uncovered.is_empty());
    assert!(column(&colony, &pawns, "Doctor").iter().any(|&p| p > 0));
}

#[test]
fn test_uncoverable_work_type_reported() {
    let mut settings = isolated_settings();
    settings.rule_for_mut("Research").ensure_worker_assigned = Some(true);

    let mut colony = Colony::vanilla();
    let pawns: Vec<PawnId> = ["Ann", "Bo"]
        .iter()
        .map(|name| colony.spawn(PawnSpec::colonist(name).incapable_of("Research")))
        .collect();

    let mut engine = WorkEngine::new(settings);
    let report = engine.force_update(&mut colony).unwrap().priorities.unwrap();

    assert_eq!(report.uncovered, vec!["Research".to_string()]);
    assert_eq!(column(&colony, &pawns, "Research"), vec![0, 0]);
    // Other work types are still assigned
    assert_eq!(column(&colony, &pawns, "Firefighter"), vec![1, 1]);
}

#[test]
fn test_missing_default_rule_aborts_without_mutation() {
    let mut settings = Settings::default();
    settings.rules.retain(|r| !r.is_default());

    let mut colony = Colony::vanilla();
    let pawn = colony.spawn(PawnSpec::colonist("Ann"));
    let hauling = work_type(&colony, "Hauling");
    colony.set_priority(pawn, hauling, 3);
    let before = colony.priorities_of(pawn);

    let mut engine = WorkEngine::new(settings);
    let err = engine.update(&mut colony).unwrap_err();
    assert_eq!(err, EngineError::Config(RuleError::MissingDefaultRule));
    assert_eq!(colony.priorities_of(pawn), before);
    assert_eq!(colony.priority_notifications(), 0);

    engine.set_settings(Settings::default());
    engine.force_update(&mut colony).unwrap();
    assert_ne!(colony.priorities_of(pawn), before);
}

#[test]
fn test_melee_pawns_never_hunt() {
    let mut colony = Colony::vanilla();
    let brawler = colony.spawn(
        PawnSpec::colonist("Ann")
            .skill("Shooting", 15, PassionId::MAJOR)
            .weapon(Weapon::Melee)
            .idle(true),
    );
    let archer = colony.spawn(
        PawnSpec::colonist("Bo")
            .skill("Shooting", 2, PassionId::NONE)
            .weapon(Weapon::Ranged),
    );

    let mut engine = WorkEngine::default();
    engine.force_update(&mut colony).unwrap();
    assert_eq!(column(&colony, &[brawler, archer], "Hunting"), vec![0, 1]);

    let mut settings = Settings::default();
    settings.allow_melee_hunters = true;
    engine.set_settings(settings);
    engine.force_update(&mut colony).unwrap();
    assert_eq!(colony.priority(brawler, work_type(&colony, "Hunting")), 1);
}

#[test]
fn test_idle_guest_gets_idle_priority() {
    let mut colony = Colony::vanilla();
    colony.spawn(PawnSpec::colonist("Ann"));
    let guest = colony.spawn(PawnSpec::new("Visitor", PawnClass::Guest).idle(true));

    let mut engine = WorkEngine::default();
    let report = engine.force_update(&mut colony).unwrap().priorities.unwrap();

    assert_eq!(column(&colony, &[guest], "Cleaning"), vec![4]);
    // Unarmed pawns are never hunters, idle or not
    assert_eq!(column(&colony, &[guest], "Hunting"), vec![0]);
    assert!(report.idle > 0);
}

struct NoCooking;

impl WorkBadPredicate for NoCooking {
    fn is_work_bad(&self, _pawn: PawnId, work_type: &WorkType) -> bool {
        work_type.name == "Cooking"
    }
}

#[test]
fn test_bad_work_is_avoided() {
    let mut colony = Colony::vanilla();
    let cook = colony.spawn(PawnSpec::colonist("Ann").skill("Cooking", 20, PassionId::MAJOR));

    let mut engine = WorkEngine::with_compat(Settings::default(), Compat::default().with_bad_work(NoCooking));
    engine.force_update(&mut colony).unwrap();

    assert_eq!(column(&colony, &[cook], "Cooking"), vec![0]);
    assert!(column(&colony, &[cook], "Cleaning")[0] > 0);
}

#[test]
fn test_dead_pawns_drop_out() {
    let mut colony = generate_colony(&ColonyConfig::default());
    let mut engine = WorkEngine::default();
    let first = engine.force_update(&mut colony).unwrap().priorities.unwrap();

    let gone = colony.roster()[0];
    colony.despawn(gone);
    let second = engine.force_update(&mut colony).unwrap().priorities.unwrap();

    assert_eq!(second.pawns, first.pawns - 1);
    assert!(engine.context().cache().peek(gone).is_none());
}

#[test]
fn test_passion_priorities() {
    let mut colony = Colony::vanilla();
    let ann = colony.spawn(
        PawnSpec::colonist("Ann")
            .skill("Mining", 4, PassionId::MAJOR)
            .skill("Cooking", 4, PassionId::MINOR),
    );
    let bo = colony.spawn(PawnSpec::colonist("Bo").skill("Mining", 4, PassionId::NONE));

    let mut engine = WorkEngine::new(isolated_settings());
    let report = engine.force_update(&mut colony).unwrap().priorities.unwrap();

    assert_eq!(column(&colony, &[ann, bo], "Mining"), vec![2, 0]);
    assert_eq!(column(&colony, &[ann], "Cooking"), vec![3]);
    assert!(report.passion >= 2);
}

#[test]
fn test_learning_rate_thresholds() {
    let mut settings = isolated_settings();
    settings.learning.enabled = true;
    settings.learning.major_priority = 1;
    settings.learning.minor_priority = 2;
    settings.leftover_priority = 4;

    let mut colony = Colony::vanilla();
    let fast = colony.spawn(PawnSpec::colonist("Ann").skill_with_rate("Crafting", 3, PassionId::NONE, 2.0));
    let steady = colony.spawn(PawnSpec::colonist("Bo").skill_with_rate("Artistic", 3, PassionId::NONE, 1.5));

    let mut engine = WorkEngine::new(settings);
    engine.force_update(&mut colony).unwrap();

    // 2.0 clears the major threshold, 1.5 only the minor one
    assert_eq!(column(&colony, &[fast, steady], "Crafting"), vec![1, 0]);
    assert_eq!(column(&colony, &[fast, steady], "Art"), vec![0, 2]);
}

#[test]
fn test_pawn_without_work_gets_least_contested_work_type() {
    let mut base = AssignmentRule::default_rule();
    base.dedicated.allow = Some(false);

    let mut hauling = AssignmentRule::for_work_type("Hauling");
    hauling.filter.guests = Some(true);
    hauling.dedicated.allow = Some(true);
    hauling.dedicated.constant_count = Some(2);

    let mut cleaning = AssignmentRule::for_work_type("Cleaning");
    cleaning.filter.guests = Some(true);
    cleaning.dedicated.allow = Some(true);
    cleaning.dedicated.constant_count = Some(1);

    let mut settings = isolated_settings();
    settings.rules = vec![base, hauling, cleaning];
    settings.leftover_priority = 4;

    let mut colony = Colony::vanilla();
    let colonists: Vec<PawnId> = ["Ann", "Bo", "Cy"]
        .iter()
        .map(|name| colony.spawn(PawnSpec::colonist(name)))
        .collect();
    let guest = colony.spawn(PawnSpec::new("Gus", PawnClass::Guest));

    let mut engine = WorkEngine::new(settings);
    let report = engine.force_update(&mut colony).unwrap().priorities.unwrap();

    assert_eq!(column(&colony, &colonists, "Hauling"), vec![1, 1, 0]);
    assert_eq!(column(&colony, &colonists, "Cleaning"), vec![0, 0, 1]);
    // The only work types open to the guest are both taken; Cleaning has fewer hands
    assert_eq!(column(&colony, &[guest], "Cleaning"), vec![4]);
    assert_eq!(column(&colony, &[guest], "Hauling"), vec![0]);
    assert_eq!(colony.priorities_of(guest).iter().filter(|&&p| p > 0).count(), 1);
    assert!(report.leftover > 0);
}

#[test]
fn test_reordered_catalog_keeps_manual_cells() {
    let mut colony = Colony::vanilla();
    let ann = colony.spawn(PawnSpec::colonist("Ann").skill("Artistic", 8, PassionId::MAJOR));

    let mut engine = WorkEngine::default();
    engine.context_mut().set_work_type_managed("Art", false);
    engine.force_update(&mut colony).unwrap();

    let reversed: WorkCatalog = colony.work_types().iter().rev().cloned().collect();
    colony.set_work_types(reversed);
    let art = work_type(&colony, "Art");
    colony.set_priority(ann, art, 3);

    // Same game time, so only a catalog check can catch the stale snapshot
    engine.force_update(&mut colony).unwrap();
    assert_eq!(colony.priority(ann, art), 3);
}
