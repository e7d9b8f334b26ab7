//! Autowork Headless Harness
//!
//! Runs generated colonies through the work engine and checks the
//! invariants every pass must hold. Entirely in-process: no game, no UI.
//!
//! Usage:
//!   cargo run -p autowork-simtest
//!   cargo run -p autowork-simtest -- --verbose
//!   cargo run -p autowork-simtest -- --json priorities.json
//!   RUST_LOG=debug cargo run -p autowork-simtest

use std::collections::BTreeMap;

use autowork_core::generation::{generate_colony, ColonyConfig};
use autowork_core::prelude::*;
use autowork_logic::config::validate_settings;
use autowork_logic::constants::schedule::HOURS;
use autowork_logic::defaults::vanilla_work_types;
use autowork_logic::rules::resolve_all;
use autowork_logic::schedule::TimeAssignment;
use autowork_logic::work::WorkCatalogExt;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose");
    let json_path = args
        .iter()
        .position(|a| a == "--json")
        .and_then(|i| args.get(i + 1))
        .cloned();
    println!("=== Autowork Engine Harness ===\n");

    let mut results = Vec::new();

    // 1. Default configuration
    results.extend(validate_configuration(verbose));

    // 2. Invariant sweep over generated colonies
    results.extend(validate_colony_sweep(verbose));

    // 3. Cadence over simulated days
    results.extend(validate_cadence(verbose));

    // 4. Shift assignment
    results.extend(validate_schedules(verbose));

    // 5. Engine state persistence
    results.extend(validate_persistence(verbose));

    if let Some(path) = json_path {
        results.push(dump_priorities(&path));
    }

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Configuration ────────────────────────────────────────────────────

fn validate_configuration(verbose: bool) -> Vec<TestResult> {
    println!("--- Configuration ---");
    let mut results = Vec::new();
    let settings = Settings::default();

    let issues = validate_settings(&settings);
    results.push(TestResult {
        name: "config_defaults_valid".into(),
        passed: issues.is_empty(),
        detail: if issues.is_empty() {
            "default settings pass validation".into()
        } else {
            issues.join("; ")
        },
    });

    let catalog = vanilla_work_types();
    match resolve_all(&settings.rules, &catalog) {
        Ok(set) => {
            results.push(TestResult {
                name: "config_rules_resolve".into(),
                passed: set.len() == catalog.len() && set.unknown_work_types.is_empty(),
                detail: format!("{} resolved rules for {} work types", set.len(), catalog.len()),
            });
            if verbose {
                println!("  Processing order:");
                for rule in set.iter() {
                    println!(
                        "    {:16} skills={} natural={}",
                        rule.name, rule.relevant_skill_count, rule.natural_priority
                    );
                }
            }
        }
        Err(e) => results.push(TestResult {
            name: "config_rules_resolve".into(),
            passed: false,
            detail: e.to_string(),
        }),
    }

    let json = serde_json::to_string(&settings).unwrap_or_default();
    let roundtrip: Option<Settings> = serde_json::from_str(&json).ok();
    results.push(TestResult {
        name: "config_json_roundtrip".into(),
        passed: roundtrip.as_ref() == Some(&settings),
        detail: format!("{} bytes of JSON", json.len()),
    });

    let mut wild = Settings {
        updates_per_day: 0,
        max_priority: 200,
        idle_priority: 0,
        ..Settings::default()
    };
    wild.clamp();
    results.push(TestResult {
        name: "config_clamp".into(),
        passed: wild.updates_per_day >= 1 && wild.max_priority <= 9 && wild.idle_priority >= 1,
        detail: format!(
            "updates_per_day={} max_priority={} idle_priority={}",
            wild.updates_per_day, wild.max_priority, wild.idle_priority
        ),
    });

    results
}

// ── 2. Colony Sweep ─────────────────────────────────────────────────────

fn validate_colony_sweep(verbose: bool) -> Vec<TestResult> {
    println!("--- Colony Sweep ---");
    let mut results = Vec::new();

    let mut out_of_range = 0;
    let mut uncovered_fire = 0;
    let mut not_idempotent = 0;
    let mut overridden = 0;
    let mut runs = 0;

    for seed in 1..=12u64 {
        for colonists in [3u32, 10, 25] {
            runs += 1;
            let mut colony = generate_colony(&ColonyConfig {
                seed,
                colonists,
                partner_pairs: colonists / 4,
                ..ColonyConfig::default()
            });
            let mut engine = WorkEngine::default();
            let max = engine.settings().max_priority;

            // One pawn stays under manual control
            let mut rng = StdRng::seed_from_u64(seed);
            let roster = colony.roster();
            let manual = roster.choose(&mut rng).copied();
            if let Some(pawn) = manual {
                for idx in 0..colony.work_types().len() {
                    colony.set_priority(pawn, WorkTypeId(idx as u16), (idx % 3) as u8);
                }
                engine.context_mut().set_pawn_managed(pawn, false);
            }
            let manual_before = manual.map(|p| colony.priorities_of(p));

            let first = match engine.force_update(&mut colony) {
                Ok(outcome) => outcome.priorities.unwrap_or_default(),
                Err(e) => {
                    results.push(TestResult {
                        name: format!("sweep_s{}_c{}", seed, colonists),
                        passed: false,
                        detail: e.to_string(),
                    });
                    continue;
                }
            };

            let all: Vec<Vec<u8>> = colony.roster().iter().map(|&p| colony.priorities_of(p)).collect();
            if all.iter().flatten().any(|&p| p > max) {
                out_of_range += 1;
            }

            let fire = colony.work_types().id_of("Firefighter");
            let fire_eligible = colony
                .roster()
                .iter()
                .any(|&p| Some(p) != manual && colony.is_capable_of_work(p) && colony.pawn_class(p) != Some(PawnClass::Guest));
            let fire_covered = fire.is_some_and(|wt| colony.roster().iter().any(|&p| colony.priority(p, wt) > 0));
            if fire_eligible && !fire_covered {
                uncovered_fire += 1;
            }

            let second = engine.force_update(&mut colony).ok().and_then(|o| o.priorities);
            if second.map(|r| r.changed_cells) != Some(0) {
                not_idempotent += 1;
            }

            if manual.map(|p| colony.priorities_of(p)) != manual_before {
                overridden += 1;
            }

            if verbose {
                println!(
                    "  seed={:2} colonists={:2}: {} pawns, {} changed, {} dedicated, {} leftover, {} idle",
                    seed, colonists, first.pawns, first.changed_cells, first.dedicated, first.leftover, first.idle
                );
            }
        }
    }

    results.push(TestResult {
        name: "sweep_priority_range".into(),
        passed: out_of_range == 0,
        detail: format!("{}/{} colonies with priorities above max", out_of_range, runs),
    });
    results.push(TestResult {
        name: "sweep_ensure_coverage".into(),
        passed: uncovered_fire == 0,
        detail: format!("{}/{} colonies with firefighting uncovered", uncovered_fire, runs),
    });
    results.push(TestResult {
        name: "sweep_idempotence".into(),
        passed: not_idempotent == 0,
        detail: format!("{}/{} colonies changed on a repeated pass", not_idempotent, runs),
    });
    results.push(TestResult {
        name: "sweep_manual_untouched".into(),
        passed: overridden == 0,
        detail: format!("{}/{} colonies overwrote an unmanaged pawn", overridden, runs),
    });

    results
}

// ── 3. Cadence ──────────────────────────────────────────────────────────

fn validate_cadence(_verbose: bool) -> Vec<TestResult> {
    println!("--- Cadence ---");
    let mut results = Vec::new();

    for updates_per_day in [1u32, 2, 8, 24] {
        let mut colony = generate_colony(&ColonyConfig::default());
        let mut settings = Settings::default();
        settings.updates_per_day = updates_per_day;
        settings.schedule.enabled = false;
        let mut engine = WorkEngine::new(settings);

        let days = 3;
        let mut passes = 0;
        for _ in 0..days * 24 {
            if let Ok(outcome) = engine.update(&mut colony) {
                if outcome.priorities.is_some() {
                    passes += 1;
                }
            }
            colony.advance(1.0);
        }
        let expected = updates_per_day * days;
        results.push(TestResult {
            name: format!("cadence_{}_per_day", updates_per_day),
            passed: passes == expected,
            detail: format!("{} passes over {} days, expected {}", passes, days, expected),
        });
    }

    let mut colony = generate_colony(&ColonyConfig::default());
    let mut engine = WorkEngine::default();
    let _ = engine.update(&mut colony);
    colony.set_paused(true);
    colony.advance(48.0);
    let paused_noop = engine.update(&mut colony).map(|o| o.is_noop()).unwrap_or(false);
    results.push(TestResult {
        name: "cadence_paused".into(),
        passed: paused_noop,
        detail: "no passes while the host is paused".into(),
    });

    results
}

// ── 4. Schedules ────────────────────────────────────────────────────────

fn validate_schedules(verbose: bool) -> Vec<TestResult> {
    println!("--- Schedules ---");
    let mut results = Vec::new();

    let mut colony = generate_colony(&ColonyConfig {
        colonists: 14,
        partner_pairs: 3,
        ..ColonyConfig::default()
    });
    let mut engine = WorkEngine::default();
    let report = match engine.force_update(&mut colony) {
        Ok(outcome) => outcome.schedule.unwrap_or_default(),
        Err(e) => {
            results.push(TestResult {
                name: "schedule_pass".into(),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };

    let roster = colony.roster();
    results.push(TestResult {
        name: "schedule_everyone_placed".into(),
        passed: report.pawns_scheduled == roster.len(),
        detail: format!("{}/{} pawns scheduled", report.pawns_scheduled, roster.len()),
    });

    let full_days = roster.iter().all(|&p| {
        colony
            .schedule_of(p)
            .map(|s| s.hours.len() == HOURS && (0..HOURS).any(|h| s.at(h) == TimeAssignment::Work))
            .unwrap_or(false)
    });
    results.push(TestResult {
        name: "schedule_full_days".into(),
        passed: full_days,
        detail: "every pawn has a 24-hour schedule with work hours".into(),
    });

    let spread = ["Day", "Evening", "Night"]
        .iter()
        .all(|shift| report.shifts.get(*shift).copied().unwrap_or(0) > 0);
    results.push(TestResult {
        name: "schedule_shifts_spread".into(),
        passed: spread,
        detail: format!("{} shifts in use", report.shifts.len()),
    });

    if verbose {
        for (shift, count) in &report.shifts {
            println!("    {:10}: {} pawns", shift, count);
        }
    }

    results
}

// ── 5. Persistence ──────────────────────────────────────────────────────

fn validate_persistence(_verbose: bool) -> Vec<TestResult> {
    println!("--- Persistence ---");
    let mut results = Vec::new();

    let mut colony = generate_colony(&ColonyConfig::default());
    let mut engine = WorkEngine::default();
    let roster = colony.roster();
    if let Some(&pawn) = roster.first() {
        engine.context_mut().set_pawn_managed(pawn, false);
    }
    let _ = engine.update(&mut colony);

    let mut buffer = Vec::new();
    let saved = engine.save_state(&mut buffer);
    let mut loaded = WorkEngine::default();
    let restored = saved.is_ok() && loaded.load_state(&buffer[..]).is_ok();

    results.push(TestResult {
        name: "persistence_roundtrip".into(),
        passed: restored && loaded.context().management() == engine.context().management(),
        detail: format!("{} bytes of engine state", buffer.len()),
    });

    let resumed_noop = loaded.update(&mut colony).map(|o| o.is_noop()).unwrap_or(false);
    results.push(TestResult {
        name: "persistence_cadence_restored".into(),
        passed: resumed_noop,
        detail: "loaded engine does not rerun passes that already ran".into(),
    });

    results
}

// ── JSON dump ───────────────────────────────────────────────────────────

fn dump_priorities(path: &str) -> TestResult {
    let mut colony = generate_colony(&ColonyConfig::default());
    let mut engine = WorkEngine::default();
    if let Err(e) = engine.force_update(&mut colony) {
        return TestResult {
            name: "json_dump".into(),
            passed: false,
            detail: e.to_string(),
        };
    }

    let names = colony.work_types().names();
    let mut table: BTreeMap<String, BTreeMap<String, u8>> = BTreeMap::new();
    for pawn in colony.roster() {
        let label = format!("{} {}", pawn, colony.name_of(pawn).unwrap_or_default());
        let row = names
            .iter()
            .zip(colony.priorities_of(pawn))
            .filter(|(_, p)| *p > 0)
            .map(|(name, p)| (name.to_string(), p))
            .collect();
        table.insert(label, row);
    }

    let written = serde_json::to_string_pretty(&table)
        .map_err(|e| e.to_string())
        .and_then(|json| std::fs::write(path, json).map_err(|e| e.to_string()));
    TestResult {
        name: "json_dump".into(),
        passed: written.is_ok(),
        detail: match written {
            Ok(()) => format!("{} pawns written to {}", table.len(), path),
            Err(e) => e,
        },
    }
}
