//! Optional capabilities provided by compatibility layers.
//!
//! Two capabilities can be supplied by third-party integrations: a
//! "this work is bad for this pawn" predicate, and hour-grained priority
//! storage. Each is bound once, when the engine is built, to either a
//! real implementation or the built-in pass-through.

use autowork_logic::constants::schedule::HOURS;
use autowork_logic::pawn::PawnId;
use autowork_logic::work::{WorkType, WorkTypeId};

use crate::host::ColonyHost;

/// Reports work a pawn should avoid (ideology, hediffs, ...).
pub trait WorkBadPredicate {
    fn is_work_bad(&self, pawn: PawnId, work_type: &WorkType) -> bool;
}

/// Priority storage with a separate value per hour of the day.
pub trait HourlyPriorities {
    fn priority_at(&self, pawn: PawnId, work_type: WorkTypeId, hour: usize) -> u8;
    fn set_priority_at(&mut self, pawn: PawnId, work_type: WorkTypeId, hour: usize, priority: u8);
}

#[derive(Default)]
pub enum BadWorkSource {
    /// No integration: nothing is bad.
    #[default]
    None,
    Bound(Box<dyn WorkBadPredicate>),
}

impl BadWorkSource {
    pub fn is_work_bad(&self, pawn: PawnId, work_type: &WorkType) -> bool {
        match self {
            BadWorkSource::None => false,
            BadWorkSource::Bound(predicate) => predicate.is_work_bad(pawn, work_type),
        }
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, BadWorkSource::Bound(_))
    }
}

/// Where priorities are read from and committed to.
#[derive(Default)]
pub enum PrioritySink {
    /// The host's single priority per work type.
    #[default]
    Host,
    /// Hourly storage; reads use the current hour, writes fill the whole day
    /// and mirror into the host.
    Hourly(Box<dyn HourlyPriorities>),
}

impl PrioritySink {
    pub fn read<H: ColonyHost + ?Sized>(&self, host: &H, pawn: PawnId, work_type: WorkTypeId, hour: usize) -> u8 {
        match self {
            PrioritySink::Host => host.priority(pawn, work_type),
            PrioritySink::Hourly(hourly) => hourly.priority_at(pawn, work_type, hour),
        }
    }

    pub fn write<H: ColonyHost + ?Sized>(&mut self, host: &mut H, pawn: PawnId, work_type: WorkTypeId, priority: u8) {
        if let PrioritySink::Hourly(hourly) = self {
            for hour in 0..HOURS {
                hourly.set_priority_at(pawn, work_type, hour, priority);
            }
        }
        host.set_priority(pawn, work_type, priority);
    }
}

/// The capability bindings chosen at startup.
#[derive(Default)]
pub struct Compat {
    pub bad_work: BadWorkSource,
    pub priorities: PrioritySink,
}

impl Compat {
    pub fn with_bad_work(mut self, predicate: impl WorkBadPredicate + 'static) -> Self {
        self.bad_work = BadWorkSource::Bound(Box::new(predicate));
        self
    }

    pub fn with_hourly_priorities(mut self, hourly: impl HourlyPriorities + 'static) -> Self {
        self.priorities = PrioritySink::Hourly(Box::new(hourly));
        self
    }
}

impl std::fmt::Debug for Compat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compat")
            .field("bad_work", &self.bad_work.is_bound())
            .field("hourly_priorities", &matches!(self.priorities, PrioritySink::Hourly(_)))
            .finish()
    }
}
