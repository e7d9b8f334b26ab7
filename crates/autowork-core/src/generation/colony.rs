//! Seeded procedural colonies

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use autowork_logic::defaults::skills;
use autowork_logic::passion::PassionId;
use autowork_logic::pawn::{PawnClass, PawnId, Weapon};

use super::names::generate_name;
use crate::components::Vitals;
use crate::host::{Colony, PawnSpec};

/// Configuration for colony generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColonyConfig {
    pub seed: u64,
    pub colonists: u32,
    pub slaves: u32,
    pub guests: u32,
    pub prisoners: u32,
    pub animals: u32,
    /// Colonist couples to form
    pub partner_pairs: u32,
    pub night_owl_chance: f64,
    pub injured_chance: f64,
    /// Chance per pawn of being unable to do one random work type
    pub incapable_chance: f64,
}

impl Default for ColonyConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            colonists: 8,
            slaves: 1,
            guests: 1,
            prisoners: 1,
            animals: 3,
            partner_pairs: 2,
            night_owl_chance: 0.1,
            injured_chance: 0.1,
            incapable_chance: 0.2,
        }
    }
}

/// Work types a pawn may be born unable to do
const INCAPABLE_CANDIDATES: &[&str] = &["Art", "Cleaning", "Hauling", "Cooking", "Research", "Mining"];

/// Generate a vanilla colony. The same config always yields the same colony.
pub fn generate_colony(config: &ColonyConfig) -> Colony {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut colony = Colony::vanilla();

    let mut colonists = Vec::with_capacity(config.colonists as usize);
    for _ in 0..config.colonists {
        colonists.push(colony.spawn(random_worker(PawnClass::Colonist, config, &mut rng)));
    }
    for _ in 0..config.slaves {
        colony.spawn(random_worker(PawnClass::Slave, config, &mut rng));
    }
    for _ in 0..config.guests {
        colony.spawn(random_worker(PawnClass::Guest, config, &mut rng));
    }
    for _ in 0..config.prisoners {
        colony.spawn(random_worker(PawnClass::Prisoner, config, &mut rng));
    }
    for _ in 0..config.animals {
        let mut spec = PawnSpec::new("Muffalo", PawnClass::Animal);
        if rng.gen_bool(config.injured_chance.clamp(0.0, 1.0)) {
            spec = spec.vitals(Vitals {
                injured: true,
                ..Default::default()
            });
        }
        colony.spawn(spec);
    }

    colonists.shuffle(&mut rng);
    let pairs: Vec<(PawnId, PawnId)> = colonists
        .chunks_exact(2)
        .take(config.partner_pairs as usize)
        .map(|pair| (pair[0], pair[1]))
        .collect();
    for (a, b) in pairs {
        colony.add_partners(a, b);
    }

    log::info!(
        "Generated colony: {} pawns ({} colonists), seed {}",
        colony.pawn_count(),
        config.colonists,
        config.seed
    );
    colony
}

fn random_worker(class: PawnClass, config: &ColonyConfig, rng: &mut StdRng) -> PawnSpec {
    let mut spec = PawnSpec::new("", class);
    spec.name = generate_name(rng);

    for skill in skills::ALL {
        let level = rng.gen_range(0..=20);
        let passion = match rng.gen_range(0..100) {
            0..=59 => PassionId::NONE,
            60..=87 => PassionId::MINOR,
            _ => PassionId::MAJOR,
        };
        spec = spec.skill(skill, level, passion);
    }

    spec = spec.weapon(match rng.gen_range(0..10) {
        0..=4 => Weapon::Ranged,
        5..=7 => Weapon::Melee,
        _ => Weapon::Unarmed,
    });

    if rng.gen_bool(config.night_owl_chance.clamp(0.0, 1.0)) {
        spec = spec.with_trait("NightOwl");
    }
    if rng.gen_bool(config.injured_chance.clamp(0.0, 1.0)) {
        spec = spec.vitals(Vitals {
            injured: true,
            downed: rng.gen_bool(0.3),
            ..Default::default()
        });
    }
    if rng.gen_bool(config.incapable_chance.clamp(0.0, 1.0)) {
        if let Some(work_type) = INCAPABLE_CANDIDATES.choose(rng) {
            spec = spec.incapable_of(work_type);
        }
    }
    spec.idle(rng.gen_bool(0.25))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ColonyHost;

    #[test]
    fn test_generation_counts() {
        let config = ColonyConfig::default();
        let colony = generate_colony(&config);
        assert_eq!(colony.pawn_count(), 14);
        // Prisoners and animals are not on the work roster
        assert_eq!(colony.roster().len(), 10);
    }

    #[test]
    fn test_same_seed_same_colony() {
        let config = ColonyConfig {
            seed: 9,
            ..Default::default()
        };
        let a = generate_colony(&config);
        let b = generate_colony(&config);
        for pawn in a.roster() {
            assert_eq!(a.name_of(pawn), b.name_of(pawn));
            assert_eq!(a.weapon(pawn), b.weapon(pawn));
            assert_eq!(a.partners(pawn), b.partners(pawn));
        }
    }

    #[test]
    fn test_partner_pairs() {
        let colony = generate_colony(&ColonyConfig {
            colonists: 6,
            partner_pairs: 2,
            ..Default::default()
        });
        let paired = colony
            .roster()
            .into_iter()
            .filter(|&p| !colony.partners(p).is_empty())
            .count();
        assert_eq!(paired, 4);
    }
}
