//! Autowork Core - rule-driven work priorities for colony pawns
//!
//! The engine periodically recomputes every pawn's work-type priorities
//! from a configurable rule set, replacing manual assignment. It talks to
//! the game only through the [`host::ColonyHost`] trait.
//!
//! # Architecture
//!
//! - **Host**: [`host::ColonyHost`] is what the engine reads and writes;
//!   [`host::Colony`] is a reference host built on a `hecs` ECS world.
//! - **Context**: [`context::EngineContext`] owns settings, resolved rules,
//!   the passion score table, the snapshot cache and management flags.
//! - **Systems**: the priority pass and the schedule pass.
//! - **Engine**: [`engine::WorkEngine`] gates the passes on game-time cadence.
//!
//! # Example
//!
//! ```rust
//! use autowork_core::prelude::*;
//! use autowork_core::generation::{generate_colony, ColonyConfig};
//!
//! let mut colony = generate_colony(&ColonyConfig::default());
//! let mut engine = WorkEngine::new(Settings::default());
//!
//! // Called from the host's tick; only does work when a pass is due
//! let outcome = engine.update(&mut colony).unwrap();
//! assert!(outcome.priorities.is_some());
//! ```

pub mod cache;
pub mod compat;
pub mod components;
pub mod context;
pub mod engine;
pub mod error;
pub mod generation;
pub mod host;
pub mod management;
pub mod persistence;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::compat::{BadWorkSource, Compat, HourlyPriorities, PrioritySink, WorkBadPredicate};
    pub use crate::context::EngineContext;
    pub use crate::engine::{UpdateOutcome, WorkEngine};
    pub use crate::error::EngineError;
    pub use crate::host::{Colony, ColonyHost, PawnSpec};
    pub use crate::systems::{PassReport, ScheduleReport};
    pub use autowork_logic::config::Settings;
    pub use autowork_logic::pawn::{PawnClass, PawnId, Weapon};
    pub use autowork_logic::work::WorkTypeId;
}
