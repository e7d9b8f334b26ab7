//! Passion definitions and the normalized passion score table.
//!
//! Raw desirability of a passion level is `learn_rate_factor * 2 - forget_rate_factor`.
//! Scores are normalized linearly over every level the host knows about,
//! including mod-added ones, so the least desirable level scores 0 and the
//! most desirable scores 1.
//!
//! ```
//! use autowork_logic::passion::{PassionScoreTable, vanilla_passions, PassionId};
//!
//! let table = PassionScoreTable::build(&vanilla_passions());
//! assert_eq!(table.score(PassionId::NONE), 0.0);
//! assert_eq!(table.score(PassionId::MAJOR), 1.0);
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::defs::{DefRegistry, NamedDef};
use crate::learning::normalize_span;

/// Index of a passion level in its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PassionId(pub u8);

impl PassionId {
    pub const NONE: PassionId = PassionId(0);
    pub const MINOR: PassionId = PassionId(1);
    pub const MAJOR: PassionId = PassionId(2);
}

/// How the passion pass treats a passion level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum PassionTier {
    #[default]
    None,
    Minor,
    Major,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassionDef {
    pub name: String,
    pub learn_rate_factor: f32,
    pub forget_rate_factor: f32,
    #[serde(default)]
    pub tier: PassionTier,
}

impl PassionDef {
    pub fn new(name: &str, learn_rate_factor: f32, forget_rate_factor: f32, tier: PassionTier) -> Self {
        Self {
            name: name.to_string(),
            learn_rate_factor,
            forget_rate_factor,
            tier,
        }
    }

    pub fn raw_score(&self) -> f32 {
        self.learn_rate_factor * 2.0 - self.forget_rate_factor
    }
}

impl NamedDef for PassionDef {
    fn def_name(&self) -> &str {
        &self.name
    }
}

pub type PassionRegistry = DefRegistry<PassionDef>;

/// The three passion levels of the unmodded host, in [`PassionId`] order.
pub fn vanilla_passions() -> PassionRegistry {
    [
        PassionDef::new("None", 0.35, 1.0, PassionTier::None),
        PassionDef::new("Minor", 1.0, 1.0, PassionTier::Minor),
        PassionDef::new("Major", 1.5, 1.0, PassionTier::Major),
    ]
    .into_iter()
    .collect()
}

/// Normalized 0..1 desirability per passion level.
///
/// Built once per session; call [`PassionScoreTable::build`] again after
/// the passion registry changes.
#[derive(Debug, Clone, Default)]
pub struct PassionScoreTable {
    scores: HashMap<PassionId, f32>,
    tiers: HashMap<PassionId, PassionTier>,
}

impl PassionScoreTable {
    pub fn build(passions: &PassionRegistry) -> Self {
        let raw: Vec<f32> = passions.iter().map(PassionDef::raw_score).collect();
        let min = raw.iter().copied().fold(f32::INFINITY, f32::min);
        let max = raw.iter().copied().fold(f32::NEG_INFINITY, f32::max);

        let mut scores = HashMap::with_capacity(raw.len());
        let mut tiers = HashMap::with_capacity(raw.len());
        for (idx, (def, value)) in passions.iter().zip(raw).enumerate() {
            let id = PassionId(idx as u8);
            scores.insert(id, normalize_span(value, min, max));
            tiers.insert(id, def.tier);
        }
        Self { scores, tiers }
    }

    /// Normalized score; unknown levels score 0.
    pub fn score(&self, passion: PassionId) -> f32 {
        self.scores.get(&passion).copied().unwrap_or(0.0)
    }

    pub fn tier(&self, passion: PassionId) -> PassionTier {
        self.tiers.get(&passion).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
