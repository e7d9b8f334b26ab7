//! Pass invariants over arbitrary generated colonies.

use autowork_core::generation::{generate_colony, ColonyConfig};
use autowork_core::prelude::*;
use autowork_logic::work::WorkCatalogExt;
use proptest::prelude::*;

fn all_priorities(colony: &Colony) -> Vec<Vec<u8>> {
    colony.roster().into_iter().map(|p| colony.priorities_of(p)).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn repeated_pass_is_idempotent(seed in any::<u64>(), colonists in 1u32..16) {
        let mut colony = generate_colony(&ColonyConfig {
            seed,
            colonists,
            ..ColonyConfig::default()
        });
        let mut engine = WorkEngine::default();
        engine.force_update(&mut colony).unwrap();
        let before = all_priorities(&colony);

        let second = engine.force_update(&mut colony).unwrap().priorities.unwrap();
        prop_assert_eq!(second.changed_cells, 0);
        prop_assert_eq!(all_priorities(&colony), before);
    }

    #[test]
    fn unmanaged_priorities_are_never_written(
        seed in any::<u64>(),
        pawn in any::<prop::sample::Index>(),
        work in any::<prop::sample::Index>(),
        manual in 1u8..=4,
    ) {
        let mut colony = generate_colony(&ColonyConfig {
            seed,
            ..ColonyConfig::default()
        });
        let roster = colony.roster();
        let pawn = roster[pawn.index(roster.len())];
        let names: Vec<String> = colony.work_types().iter().map(|wt| wt.name.clone()).collect();
        let name = &names[work.index(names.len())];
        let column = colony.work_types().id_of(name).unwrap();

        for idx in 0..names.len() {
            colony.set_priority(pawn, WorkTypeId(idx as u16), manual);
        }
        for &other in &roster {
            colony.set_priority(other, column, manual);
        }

        let mut engine = WorkEngine::default();
        engine.context_mut().set_pawn_managed(pawn, false);
        engine.context_mut().set_work_type_managed(name, false);
        engine.force_update(&mut colony).unwrap();
        colony.advance(30.0);
        engine.update(&mut colony).unwrap();

        prop_assert_eq!(colony.priorities_of(pawn), vec![manual; names.len()]);
        for &other in &roster {
            prop_assert_eq!(colony.priority(other, column), manual);
        }
    }
}
