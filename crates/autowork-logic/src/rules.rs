//! Assignment rules and their resolution against the default rule.
//!
//! Every field of an [`AssignmentRule`] is tri-state: `Some(true)`,
//! `Some(false)` or unset (`None`). Exactly one rule has no work type;
//! it is the default every work-type rule falls back to, field by field.
//! [`resolve_all`] merges once per configuration change and produces one
//! concrete [`ResolvedRule`] per work type, in processing order.
//!
//! # Processing order
//!
//! Resolved rules are sorted by relevant-skill count (desc), natural
//! priority (desc), then name. Skill-heavy and important work types are
//! handled first so they get first pick of the colony's best pawns.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{dedicated as limits, priorities};
use crate::defs::DefBacked;
use crate::pawn::{PawnClass, PawnFacts};
use crate::work::{WorkCatalog, WorkType, WorkTypeId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("no default assignment rule (a rule without a work type) is configured")]
    MissingDefaultRule,
    #[error("{count} default assignment rules are configured, expected exactly one")]
    DuplicateDefaultRule { count: usize },
}

// ── Filters ─────────────────────────────────────────────────────────────

/// Which pawns a rule applies to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentFilter {
    pub colonists: Option<bool>,
    pub slaves: Option<bool>,
    pub guests: Option<bool>,
    /// Pawns that are injured or ill but still able to work.
    pub recovering: Option<bool>,
    /// Pawns for whom the compatibility layer flags the work as bad.
    pub bad_work: Option<bool>,
}

impl AgentFilter {
    pub fn resolve(&self, fallback: &AgentFilter) -> ResolvedFilter {
        let builtin = ResolvedFilter::default();
        ResolvedFilter {
            colonists: self.colonists.or(fallback.colonists).unwrap_or(builtin.colonists),
            slaves: self.slaves.or(fallback.slaves).unwrap_or(builtin.slaves),
            guests: self.guests.or(fallback.guests).unwrap_or(builtin.guests),
            recovering: self.recovering.or(fallback.recovering).unwrap_or(builtin.recovering),
            bad_work: self.bad_work.or(fallback.bad_work).unwrap_or(builtin.bad_work),
        }
    }

    /// A filter with every field set to the built-in default.
    pub fn concrete_default() -> Self {
        let d = ResolvedFilter::default();
        Self {
            colonists: Some(d.colonists),
            slaves: Some(d.slaves),
            guests: Some(d.guests),
            recovering: Some(d.recovering),
            bad_work: Some(d.bad_work),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedFilter {
    pub colonists: bool,
    pub slaves: bool,
    pub guests: bool,
    pub recovering: bool,
    pub bad_work: bool,
}

impl Default for ResolvedFilter {
    fn default() -> Self {
        Self {
            colonists: true,
            slaves: true,
            guests: false,
            recovering: true,
            bad_work: false,
        }
    }
}

impl ResolvedFilter {
    pub fn allows(&self, facts: &PawnFacts) -> bool {
        let class_ok = match facts.class {
            PawnClass::Colonist => self.colonists,
            PawnClass::Slave => self.slaves,
            PawnClass::Guest => self.guests,
            PawnClass::Prisoner | PawnClass::Animal => false,
        };
        class_ok
            && (self.recovering || !facts.recovering)
            && (self.bad_work || !facts.work_is_bad)
    }
}

// ── Dedicated workers ───────────────────────────────────────────────────

/// How the number of dedicated workers for a work type is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DedicatedMode {
    #[default]
    Constant,
    WorkTypeCountRatio,
    CapablePawnRatio,
    PawnCountRatio,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DedicatedSettings {
    pub allow: Option<bool>,
    pub mode: Option<DedicatedMode>,
    pub constant_count: Option<u32>,
    pub work_type_ratio: Option<f32>,
    pub capable_ratio: Option<f32>,
    pub pawn_count_ratio: Option<f32>,
    /// Which pawns count towards the base in `PawnCountRatio` mode.
    #[serde(default)]
    pub pawn_count_filter: AgentFilter,
    pub priority: Option<u8>,
}

impl DedicatedSettings {
    /// Switch mode. Parameters of the other modes go back to their defaults.
    pub fn set_mode(&mut self, mode: DedicatedMode) {
        self.mode = Some(mode);
        if mode != DedicatedMode::Constant {
            self.constant_count = None;
        }
        if mode != DedicatedMode::WorkTypeCountRatio {
            self.work_type_ratio = None;
        }
        if mode != DedicatedMode::CapablePawnRatio {
            self.capable_ratio = None;
        }
        if mode != DedicatedMode::PawnCountRatio {
            self.pawn_count_ratio = None;
            self.pawn_count_filter = AgentFilter::default();
        }
    }

    fn clamp(&mut self, max_priority: u8) {
        if let Some(c) = self.constant_count.as_mut() {
            *c = (*c).clamp(limits::CONSTANT_MIN, limits::CONSTANT_MAX);
        }
        clamp_opt(&mut self.work_type_ratio, limits::WORK_TYPE_RATIO_MIN, limits::WORK_TYPE_RATIO_MAX);
        clamp_opt(&mut self.capable_ratio, limits::CAPABLE_RATIO_MIN, limits::CAPABLE_RATIO_MAX);
        clamp_opt(&mut self.pawn_count_ratio, limits::PAWN_COUNT_RATIO_MIN, limits::PAWN_COUNT_RATIO_MAX);
        clamp_priority(&mut self.priority, max_priority);
    }

    /// Target for `mode`, read from this settings block.
    fn target(&self, mode: DedicatedMode, filter_fallback: &AgentFilter) -> DedicatedTarget {
        match mode {
            DedicatedMode::Constant => DedicatedTarget::Constant(
                self.constant_count
                    .unwrap_or(limits::CONSTANT_DEFAULT)
                    .clamp(limits::CONSTANT_MIN, limits::CONSTANT_MAX),
            ),
            DedicatedMode::WorkTypeCountRatio => DedicatedTarget::WorkTypeCountRatio(
                self.work_type_ratio
                    .unwrap_or(limits::WORK_TYPE_RATIO_DEFAULT)
                    .clamp(limits::WORK_TYPE_RATIO_MIN, limits::WORK_TYPE_RATIO_MAX),
            ),
            DedicatedMode::CapablePawnRatio => DedicatedTarget::CapablePawnRatio(
                self.capable_ratio
                    .unwrap_or(limits::CAPABLE_RATIO_DEFAULT)
                    .clamp(limits::CAPABLE_RATIO_MIN, limits::CAPABLE_RATIO_MAX),
            ),
            DedicatedMode::PawnCountRatio => DedicatedTarget::PawnCountRatio {
                factor: self
                    .pawn_count_ratio
                    .unwrap_or(limits::PAWN_COUNT_RATIO_DEFAULT)
                    .clamp(limits::PAWN_COUNT_RATIO_MIN, limits::PAWN_COUNT_RATIO_MAX),
                filter: self.pawn_count_filter.resolve(filter_fallback),
            },
        }
    }
}

/// Mode together with the only parameter that matters for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DedicatedTarget {
    Constant(u32),
    WorkTypeCountRatio(f32),
    CapablePawnRatio(f32),
    PawnCountRatio { factor: f32, filter: ResolvedFilter },
}

impl DedicatedTarget {
    pub fn mode(&self) -> DedicatedMode {
        match self {
            DedicatedTarget::Constant(_) => DedicatedMode::Constant,
            DedicatedTarget::WorkTypeCountRatio(_) => DedicatedMode::WorkTypeCountRatio,
            DedicatedTarget::CapablePawnRatio(_) => DedicatedMode::CapablePawnRatio,
            DedicatedTarget::PawnCountRatio { .. } => DedicatedMode::PawnCountRatio,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedDedicated {
    pub allow: bool,
    pub target: DedicatedTarget,
    pub priority: u8,
}

// ── Rules ───────────────────────────────────────────────────────────────

/// User-editable rule. `work_type == None` marks the default rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRule {
    pub work_type: Option<String>,
    #[serde(default)]
    pub filter: AgentFilter,
    #[serde(default)]
    pub dedicated: DedicatedSettings,
    pub assign_everyone: Option<bool>,
    pub assign_everyone_priority: Option<u8>,
    pub ensure_worker_assigned: Option<bool>,
    pub major_passion_priority: Option<u8>,
    pub minor_passion_priority: Option<u8>,
}

impl AssignmentRule {
    /// An override for `work_type` with every field unset.
    pub fn for_work_type(work_type: &str) -> Self {
        Self {
            work_type: Some(work_type.to_string()),
            ..Default::default()
        }
    }

    /// The fallback rule with every field set.
    pub fn default_rule() -> Self {
        Self {
            work_type: None,
            filter: AgentFilter::concrete_default(),
            dedicated: DedicatedSettings {
                allow: Some(true),
                mode: Some(DedicatedMode::Constant),
                constant_count: Some(limits::CONSTANT_DEFAULT),
                work_type_ratio: Some(limits::WORK_TYPE_RATIO_DEFAULT),
                capable_ratio: Some(limits::CAPABLE_RATIO_DEFAULT),
                pawn_count_ratio: Some(limits::PAWN_COUNT_RATIO_DEFAULT),
                pawn_count_filter: AgentFilter::concrete_default(),
                priority: Some(priorities::HIGHEST),
            },
            assign_everyone: Some(false),
            assign_everyone_priority: Some(priorities::HIGHEST),
            ensure_worker_assigned: Some(false),
            major_passion_priority: Some(2),
            minor_passion_priority: Some(3),
        }
    }

    pub fn is_default(&self) -> bool {
        self.work_type.is_none()
    }

    /// Clamp numeric fields into their documented ranges.
    pub fn clamp(&mut self, max_priority: u8) {
        self.dedicated.clamp(max_priority);
        clamp_priority(&mut self.assign_everyone_priority, max_priority);
        clamp_priority(&mut self.major_passion_priority, max_priority);
        clamp_priority(&mut self.minor_passion_priority, max_priority);
    }
}

impl DefBacked for AssignmentRule {
    type Def = WorkType;

    fn def_ref(&self) -> Option<&str> {
        self.work_type.as_deref()
    }
}

fn clamp_opt(value: &mut Option<f32>, min: f32, max: f32) {
    if let Some(v) = value.as_mut() {
        *v = if v.is_nan() { min } else { v.clamp(min, max) };
    }
}

fn clamp_priority(value: &mut Option<u8>, max_priority: u8) {
    if let Some(p) = value.as_mut() {
        *p = (*p).clamp(priorities::HIGHEST, max_priority);
    }
}

/// Fully concrete rule for one work type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRule {
    pub work_type: WorkTypeId,
    pub name: String,
    pub natural_priority: i32,
    pub relevant_skill_count: usize,
    pub filter: ResolvedFilter,
    pub dedicated: ResolvedDedicated,
    pub assign_everyone: bool,
    pub assign_everyone_priority: u8,
    pub ensure_worker_assigned: bool,
    pub major_passion_priority: u8,
    pub minor_passion_priority: u8,
}

/// Merge `specific` over `default` for `work_type`.
///
/// Tri-state fields take the specific value when set, else the default's,
/// else the built-in default. The dedicated-worker parameter is not merged
/// on its own: it is read from whichever rule supplied the merged mode.
pub fn resolve(
    specific: &AssignmentRule,
    default: &AssignmentRule,
    id: WorkTypeId,
    work_type: &WorkType,
) -> ResolvedRule {
    let builtin = AssignmentRule::default_rule();
    let filter = specific.filter.resolve(&default.filter);

    let (mode, source) = match (specific.dedicated.mode, default.dedicated.mode) {
        (Some(mode), _) => (mode, &specific.dedicated),
        (None, Some(mode)) => (mode, &default.dedicated),
        (None, None) => (DedicatedMode::default(), &builtin.dedicated),
    };
    let dedicated = ResolvedDedicated {
        allow: specific
            .dedicated
            .allow
            .or(default.dedicated.allow)
            .unwrap_or(true),
        target: source.target(mode, &default.dedicated.pawn_count_filter),
        priority: pick(specific.dedicated.priority, default.dedicated.priority, builtin.dedicated.priority),
    };

    ResolvedRule {
        work_type: id,
        name: work_type.name.clone(),
        natural_priority: work_type.natural_priority,
        relevant_skill_count: work_type.relevant_skills.len(),
        filter,
        dedicated,
        assign_everyone: pick(specific.assign_everyone, default.assign_everyone, builtin.assign_everyone),
        assign_everyone_priority: pick(
            specific.assign_everyone_priority,
            default.assign_everyone_priority,
            builtin.assign_everyone_priority,
        ),
        ensure_worker_assigned: pick(
            specific.ensure_worker_assigned,
            default.ensure_worker_assigned,
            builtin.ensure_worker_assigned,
        ),
        major_passion_priority: pick(
            specific.major_passion_priority,
            default.major_passion_priority,
            builtin.major_passion_priority,
        ),
        minor_passion_priority: pick(
            specific.minor_passion_priority,
            default.minor_passion_priority,
            builtin.minor_passion_priority,
        ),
    }
}

fn pick<T: Copy + Default>(specific: Option<T>, default: Option<T>, builtin: Option<T>) -> T {
    specific.or(default).or(builtin).unwrap_or_default()
}

/// Processing order of resolved rules.
pub fn processing_order(a: &ResolvedRule, b: &ResolvedRule) -> Ordering {
    b.relevant_skill_count
        .cmp(&a.relevant_skill_count)
        .then(b.natural_priority.cmp(&a.natural_priority))
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
}

/// All work types' resolved rules, in processing order.
#[derive(Debug, Clone, Default)]
pub struct ResolvedRuleSet {
    rules: Vec<ResolvedRule>,
    index: HashMap<WorkTypeId, usize>,
    /// Work-type names of rules that matched nothing in the catalog.
    pub unknown_work_types: Vec<String>,
}

impl ResolvedRuleSet {
    pub fn get(&self, id: WorkTypeId) -> Option<&ResolvedRule> {
        self.index.get(&id).map(|&idx| &self.rules[idx])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResolvedRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Resolve one rule per catalog work type.
///
/// Fails when the rule list does not contain exactly one default rule.
/// Rules naming work types that are not in the catalog are ignored and
/// reported in [`ResolvedRuleSet::unknown_work_types`]; when several
/// rules name the same work type, the first one wins.
pub fn resolve_all(rules: &[AssignmentRule], catalog: &WorkCatalog) -> Result<ResolvedRuleSet, RuleError> {
    let mut defaults = rules.iter().filter(|r| r.is_default());
    let default = defaults.next().ok_or(RuleError::MissingDefaultRule)?;
    let extra = defaults.count();
    if extra > 0 {
        return Err(RuleError::DuplicateDefaultRule { count: extra + 1 });
    }

    let mut specific: HashMap<&str, &AssignmentRule> = HashMap::new();
    let mut unknown_work_types = Vec::new();
    for rule in rules.iter().filter(|r| !r.is_default()) {
        match (rule.def_ref(), rule.resolve(catalog)) {
            (Some(name), Some(_)) => {
                specific.entry(name).or_insert(rule);
            }
            (Some(name), None) => unknown_work_types.push(name.to_string()),
            (None, _) => {}
        }
    }

    let empty = AssignmentRule::default();
    let mut resolved: Vec<ResolvedRule> = catalog
        .iter()
        .enumerate()
        .map(|(idx, work_type)| {
            let rule = specific.get(work_type.name.as_str()).copied().unwrap_or(&empty);
            resolve(rule, default, WorkTypeId(idx as u16), work_type)
        })
        .collect();
    resolved.sort_by(processing_order);

    let index = resolved
        .iter()
        .enumerate()
        .map(|(idx, r)| (r.work_type, idx))
        .collect();

    Ok(ResolvedRuleSet {
        rules: resolved,
        index,
        unknown_work_types,
    })
}
