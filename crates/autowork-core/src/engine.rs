//! Work engine - main entry point, driven by the host's tick callback

use std::io::{Read, Write};

use autowork_logic::cadence::{interval_for, Cadence};
use autowork_logic::config::Settings;

use crate::compat::Compat;
use crate::context::EngineContext;
use crate::error::EngineError;
use crate::host::ColonyHost;
use crate::persistence::{self, SaveError};
use crate::systems::{run_priority_pass, run_schedule_pass, PassReport, ScheduleReport};

/// What an [`WorkEngine::update`] call actually ran
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateOutcome {
    pub priorities: Option<PassReport>,
    pub schedule: Option<ScheduleReport>,
}

impl UpdateOutcome {
    /// Nothing was due
    pub fn is_noop(&self) -> bool {
        self.priorities.is_none() && self.schedule.is_none()
    }
}

/// Cadence-gated priority and schedule passes over one colony
#[derive(Debug)]
pub struct WorkEngine {
    ctx: EngineContext,
    priority_cadence: Cadence,
    schedule_cadence: Cadence,
    last_report: Option<PassReport>,
}

impl WorkEngine {
    pub fn new(settings: Settings) -> Self {
        Self::with_compat(settings, Compat::default())
    }

    /// Engine with compatibility capabilities bound at startup
    pub fn with_compat(settings: Settings, compat: Compat) -> Self {
        let ctx = EngineContext::with_compat(settings, compat);
        let priority_cadence = Cadence::new(interval_for(ctx.settings().updates_per_day));
        let schedule_cadence = Cadence::new(ctx.settings().schedule.interval_hours as f64);
        Self {
            ctx,
            priority_cadence,
            schedule_cadence,
            last_report: None,
        }
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    /// Management flags and compatibility are edited through the context
    pub fn context_mut(&mut self) -> &mut EngineContext {
        &mut self.ctx
    }

    pub fn settings(&self) -> &Settings {
        self.ctx.settings()
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.ctx.set_settings(settings);
        self.priority_cadence.interval_hours = interval_for(self.ctx.settings().updates_per_day);
        self.schedule_cadence.interval_hours = self.ctx.settings().schedule.interval_hours as f64;
    }

    /// Report of the last successful priority pass
    pub fn last_report(&self) -> Option<&PassReport> {
        self.last_report.as_ref()
    }

    /// Hours until the next priority pass is due
    pub fn hours_until_update<H: ColonyHost + ?Sized>(&self, host: &H) -> f64 {
        self.priority_cadence.hours_until_due(host.now().total_hours())
    }

    /// Called from the host's tick. Runs whichever passes are due.
    ///
    /// A configuration error aborts the priority pass without touching any
    /// pawn; the pass is still marked as run so the next attempt waits for
    /// the normal interval. A due schedule pass runs before the error is
    /// returned.
    pub fn update<H: ColonyHost + ?Sized>(&mut self, host: &mut H) -> Result<UpdateOutcome, EngineError> {
        let mut outcome = UpdateOutcome::default();
        if host.is_paused() {
            return Ok(outcome);
        }
        let now = host.now().total_hours();

        let priorities = if self.priority_cadence.is_due(now) {
            self.priority_cadence.mark(now);
            Some(run_priority_pass(&mut self.ctx, host))
        } else {
            log::debug!(
                "Priority pass not due for {:.1}h",
                self.priority_cadence.hours_until_due(now)
            );
            None
        };

        if self.ctx.settings().schedule.enabled && self.schedule_cadence.is_due(now) {
            self.schedule_cadence.mark(now);
            outcome.schedule = Some(run_schedule_pass(&self.ctx, host));
        }

        if let Some(result) = priorities {
            let report = result?;
            self.last_report = Some(report.clone());
            outcome.priorities = Some(report);
        }
        Ok(outcome)
    }

    /// Run both passes now, ignoring cadence and pause.
    pub fn force_update<H: ColonyHost + ?Sized>(&mut self, host: &mut H) -> Result<UpdateOutcome, EngineError> {
        let now = host.now().total_hours();
        self.priority_cadence.mark(now);
        let result = run_priority_pass(&mut self.ctx, host);

        let schedule = if self.ctx.settings().schedule.enabled {
            self.schedule_cadence.mark(now);
            Some(run_schedule_pass(&self.ctx, host))
        } else {
            None
        };

        let report = result?;
        self.last_report = Some(report.clone());
        Ok(UpdateOutcome {
            priorities: Some(report),
            schedule,
        })
    }

    /// Drop management exclusions of pawns no longer on the roster.
    pub fn forget_departed<H: ColonyHost + ?Sized>(&mut self, host: &H) {
        let roster = host.roster();
        let mut management = self.ctx.management().clone();
        management.retain_pawns(&roster);
        if &management != self.ctx.management() {
            self.ctx.set_management(management);
        }
    }

    /// Save engine state to a writer
    pub fn save_state<W: Write>(&self, writer: W) -> Result<(), SaveError> {
        persistence::save_state(
            writer,
            self.ctx.management(),
            self.priority_cadence.last_run,
            self.schedule_cadence.last_run,
        )
    }

    /// Load engine state from a reader
    pub fn load_state<R: Read>(&mut self, reader: R) -> Result<(), SaveError> {
        let loaded = persistence::load_state(reader)?;
        self.ctx.set_management(loaded.management);
        self.priority_cadence.last_run = loaded.priority_last_run;
        self.schedule_cadence.last_run = loaded.schedule_last_run;
        self.last_report = None;
        Ok(())
    }
}

impl Default for WorkEngine {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
