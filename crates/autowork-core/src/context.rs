//! All engine state, passed explicitly into every pass.
//!
//! An [`EngineContext`] bundles the configuration, the resolved rule set
//! derived from it, the passion score table, the snapshot cache, the
//! management flags and the compatibility bindings. Nothing is global, so
//! independent contexts can run side by side (tests do).

use autowork_logic::config::Settings;
use autowork_logic::passion::{PassionRegistry, PassionScoreTable};
use autowork_logic::pawn::PawnId;
use autowork_logic::rules::{resolve_all, ResolvedRuleSet, RuleError};
use autowork_logic::work::WorkCatalog;

use crate::cache::AgentSnapshotCache;
use crate::compat::Compat;
use crate::error::EngineError;
use crate::management::ManagementState;

#[derive(Debug)]
pub struct EngineContext {
    pub(crate) settings: Settings,
    pub(crate) rules: Option<ResolvedRuleSet>,
    /// Catalog names `rules` was resolved against
    rules_key: Vec<String>,
    pub(crate) passions: PassionScoreTable,
    passions_key: Option<Vec<String>>,
    pub(crate) cache: AgentSnapshotCache,
    pub(crate) management: ManagementState,
    pub(crate) compat: Compat,
    reported_error: Option<RuleError>,
}

impl EngineContext {
    pub fn new(settings: Settings) -> Self {
        Self::with_compat(settings, Compat::default())
    }

    pub fn with_compat(mut settings: Settings, compat: Compat) -> Self {
        settings.clamp();
        let ttl = settings.cache_ttl_hours as f64;
        Self {
            settings,
            rules: None,
            rules_key: Vec::new(),
            passions: PassionScoreTable::default(),
            passions_key: None,
            cache: AgentSnapshotCache::new(ttl),
            management: ManagementState::new(),
            compat,
            reported_error: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the configuration. Derived state is rebuilt on next use.
    pub fn set_settings(&mut self, mut settings: Settings) {
        settings.clamp();
        self.cache.set_ttl(settings.cache_ttl_hours as f64);
        self.settings = settings;
        self.rules = None;
        self.cache.invalidate_all();
        self.reported_error = None;
    }

    pub fn management(&self) -> &ManagementState {
        &self.management
    }

    pub fn set_management(&mut self, management: ManagementState) {
        self.management = management;
        self.cache.invalidate_all();
    }

    pub fn set_pawn_managed(&mut self, pawn: PawnId, managed: bool) {
        self.management.set_pawn_managed(pawn, managed);
        self.cache.invalidate(pawn);
    }

    pub fn set_cell_managed(&mut self, pawn: PawnId, work_type: &str, managed: bool) {
        self.management.set_cell_managed(pawn, work_type, managed);
        self.cache.invalidate(pawn);
    }

    pub fn set_work_type_managed(&mut self, work_type: &str, managed: bool) {
        self.management.set_work_type_managed(work_type, managed);
        self.cache.invalidate_all();
    }

    pub fn set_schedule_managed(&mut self, pawn: PawnId, managed: bool) {
        self.management.set_schedule_managed(pawn, managed);
        self.cache.invalidate(pawn);
    }

    pub fn compat(&self) -> &Compat {
        &self.compat
    }

    pub fn cache(&self) -> &AgentSnapshotCache {
        &self.cache
    }

    /// Resolved rules from the last successful resolution, if any.
    pub fn resolved_rules(&self) -> Option<&ResolvedRuleSet> {
        self.rules.as_ref()
    }

    pub fn passion_table(&self) -> &PassionScoreTable {
        &self.passions
    }

    /// Force the passion table to be rebuilt before the next pass.
    pub fn reset_passion_table(&mut self) {
        self.passions_key = None;
        self.cache.invalidate_all();
    }

    /// Bring derived state up to date with the host's catalogs.
    ///
    /// Rules are re-resolved when the configuration or the work catalog
    /// changed; the passion table when the passion registry changed.
    pub fn prepare(&mut self, catalog: &WorkCatalog, passions: &PassionRegistry) -> Result<(), EngineError> {
        let passion_names: Vec<String> = passions.names().into_iter().map(String::from).collect();
        if self.passions_key.as_ref() != Some(&passion_names) {
            self.passions = PassionScoreTable::build(passions);
            self.passions_key = Some(passion_names);
            self.cache.invalidate_all();
        }

        let names: Vec<String> = catalog.names().into_iter().map(String::from).collect();
        if self.rules.is_none() || self.rules_key != names {
            if self.rules_key != names {
                // Snapshots are indexed by work type id
                self.cache.invalidate_all();
            }
            self.rules = None;
            match resolve_all(&self.settings.rules, catalog) {
                Ok(set) => {
                    for name in &set.unknown_work_types {
                        log::warn!("Assignment rule for unknown work type {} ignored", name);
                    }
                    self.rules = Some(set);
                    self.rules_key = names;
                }
                Err(e) => {
                    self.report_config_error(&e);
                    return Err(e.into());
                }
            }
        }
        self.reported_error = None;
        Ok(())
    }

    /// Log a configuration error once until it changes or a pass succeeds.
    fn report_config_error(&mut self, error: &RuleError) {
        if self.reported_error.as_ref() != Some(error) {
            log::error!("Work priorities left unchanged: {}", error);
            self.reported_error = Some(error.clone());
        }
    }
}
