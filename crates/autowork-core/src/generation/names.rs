//! Name generation utilities

use crate::components::Name;
use rand::seq::SliceRandom;
use rand::Rng;

/// Generate a random name, occasionally with a nickname
pub fn generate_name(rng: &mut impl Rng) -> Name {
    let given = GIVEN_NAMES.choose(rng).copied().unwrap_or("Pawn");
    let family = FAMILY_NAMES.choose(rng).copied().unwrap_or("");
    let name = Name::new(given, family);

    if rng.gen_bool(0.15) {
        if let Some(nick) = NICKNAMES.choose(rng) {
            return name.with_nickname(*nick);
        }
    }
    name
}

static GIVEN_NAMES: &[&str] = &[
    "James", "Robert", "Michael", "William", "David", "Joseph", "Mary", "Patricia",
    "Jennifer", "Linda", "Elizabeth", "Susan", "Sarah", "Wei", "Yuki", "Aisha",
    "Pavel", "Ingrid", "Carlos", "Fatima", "Kenji", "Olga", "Raj", "Amara",
    "Dmitri", "Elena", "Hassan", "Priya", "Sven", "Ming", "Akiko", "Omar",
    "Katya", "Diego", "Nadia", "Hiroshi", "Leila", "Thea", "Juno", "Felix",
];

static FAMILY_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Miller", "Davis", "Wilson",
    "Taylor", "Anderson", "Jackson", "White", "Harris", "Martin", "Chen", "Nakamura",
    "Patel", "Ivanov", "Mueller", "Garcia", "Kim", "Okonkwo", "Johansson", "Ali",
    "Petrov", "Nguyen", "Kowalski", "Santos", "Singh", "Volkov", "O'Brien", "De Silva",
];

static NICKNAMES: &[&str] = &[
    "Doc", "Sparky", "Moose", "Tiny", "Red", "Ghost", "Chef", "Digger", "Skip", "Ace",
];
