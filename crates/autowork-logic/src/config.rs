//! User-editable engine configuration.
//!
//! The settings screens of the host produce a [`Settings`] value; this
//! module owns its data model, defaults and validation, independent of
//! any UI.
//!
//! ```
//! use autowork_logic::config::{Settings, validate_settings};
//!
//! let mut settings = Settings::default();
//! settings.updates_per_day = 500;
//! settings.clamp();
//! assert_eq!(settings.updates_per_day, 48);
//! assert!(validate_settings(&settings).is_empty());
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::constants::{cadence, priorities};
use crate::dedicated::ScoreWeights;
use crate::defaults::{default_rules, default_specializations};
use crate::learning::LearningRateSettings;
use crate::rules::AssignmentRule;
use crate::schedule::ScheduleSettings;
use crate::specialization::{DoctorPolicy, SpecializationRule};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Priority passes per in-game day.
    pub updates_per_day: u32,
    /// Hours a pawn snapshot stays valid.
    pub cache_ttl_hours: f32,
    /// Number of priority levels the host exposes (lowest urgency).
    pub max_priority: u8,
    /// Must contain exactly one rule without a work type.
    pub rules: Vec<AssignmentRule>,
    pub weights: ScoreWeights,
    pub learning: LearningRateSettings,
    /// Priority used to cover work types and pawns left with nothing.
    pub leftover_priority: u8,
    /// Priority given to idle pawns for all eligible work types.
    pub idle_priority: u8,
    /// Backfill pawns with no work and hand idle pawns something to do.
    pub assign_idle_pawns: bool,
    pub specializations: Vec<SpecializationRule>,
    pub doctors: DoctorPolicy,
    pub allow_melee_hunters: bool,
    pub schedule: ScheduleSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            updates_per_day: cadence::DEFAULT_UPDATES_PER_DAY,
            cache_ttl_hours: cadence::DEFAULT_CACHE_TTL_HOURS,
            max_priority: priorities::DEFAULT_LEVELS,
            rules: default_rules(),
            weights: ScoreWeights::default(),
            learning: LearningRateSettings::default(),
            leftover_priority: 3,
            idle_priority: 4,
            assign_idle_pawns: true,
            specializations: default_specializations(),
            doctors: DoctorPolicy::default(),
            allow_melee_hunters: false,
            schedule: ScheduleSettings::default(),
        }
    }
}

impl Settings {
    /// Clamp every numeric field into its valid range.
    ///
    /// Run before every save and after every load.
    pub fn clamp(&mut self) {
        self.updates_per_day = self
            .updates_per_day
            .clamp(cadence::MIN_UPDATES_PER_DAY, cadence::MAX_UPDATES_PER_DAY);
        self.cache_ttl_hours = if self.cache_ttl_hours.is_nan() {
            cadence::DEFAULT_CACHE_TTL_HOURS
        } else {
            self.cache_ttl_hours
                .clamp(cadence::MIN_CACHE_TTL_HOURS, cadence::MAX_CACHE_TTL_HOURS)
        };
        self.max_priority = self
            .max_priority
            .clamp(priorities::MIN_LEVELS, priorities::MAX_LEVELS);

        let max = self.max_priority;
        for rule in &mut self.rules {
            rule.clamp(max);
        }
        self.weights.clamp();
        self.learning.clamp(max);
        self.leftover_priority = self.leftover_priority.clamp(priorities::HIGHEST, max);
        self.idle_priority = self.idle_priority.clamp(priorities::HIGHEST, max);
        self.schedule.clamp();
    }

    pub fn default_rule(&self) -> Option<&AssignmentRule> {
        self.rules.iter().find(|r| r.is_default())
    }

    pub fn rule_for(&self, work_type: &str) -> Option<&AssignmentRule> {
        self.rules
            .iter()
            .find(|r| r.work_type.as_deref() == Some(work_type))
    }

    /// The override for `work_type`, created empty when missing.
    pub fn rule_for_mut(&mut self, work_type: &str) -> &mut AssignmentRule {
        let idx = match self
            .rules
            .iter()
            .position(|r| r.work_type.as_deref() == Some(work_type))
        {
            Some(idx) => idx,
            None => {
                self.rules.push(AssignmentRule::for_work_type(work_type));
                self.rules.len() - 1
            }
        };
        &mut self.rules[idx]
    }
}

/// Report structural problems without changing anything.
///
/// Returns an empty list when the settings are usable.
pub fn validate_settings(settings: &Settings) -> Vec<String> {
    let mut errors = Vec::new();

    let defaults = settings.rules.iter().filter(|r| r.is_default()).count();
    match defaults {
        0 => errors.push("No default assignment rule configured".to_string()),
        1 => {}
        n => errors.push(format!("{} default assignment rules configured, expected 1", n)),
    }

    let mut seen = HashSet::new();
    for name in settings.rules.iter().filter_map(|r| r.work_type.as_deref()) {
        if !seen.insert(name) {
            errors.push(format!("Duplicate rule for work type {}", name));
        }
    }

    let mut kinds = HashSet::new();
    for spec in &settings.specializations {
        if spec.enabled && !kinds.insert(spec.kind) {
            errors.push(format!("Specialization {:?} enabled more than once", spec.kind));
        }
    }

    if settings.schedule.enabled {
        if settings.schedule.tiers.iter().all(|t| t.shifts.is_empty()) {
            errors.push("Schedule enabled but no shift tier has shifts".to_string());
        }
        for shift in settings
            .schedule
            .tiers
            .iter()
            .chain(&settings.schedule.night_owl_tiers)
            .flat_map(|t| &t.shifts)
        {
            if shift.hours.len() != crate::constants::schedule::HOURS {
                errors.push(format!("Shift {} does not cover 24 hours", shift.name));
            }
        }
    }

    errors
}
