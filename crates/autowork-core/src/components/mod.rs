//! Component definitions for the reference colony host.
//!
//! Components are pure data structs attached to pawn entities.
//! They have no behavior - the engine reads them through
//! [`crate::host::ColonyHost`].

mod common;
mod pawn;
mod social;
mod work;

pub use common::*;
pub use pawn::*;
pub use social::*;
pub use work::*;

pub use autowork_logic::pawn::{PawnClass, PawnId, Weapon};
