//! Systems - the passes that read the colony and write priorities and schedules

mod dedicated;
mod eligibility;
mod priority;
mod schedule;
mod specialists;
mod table;

pub use dedicated::*;
pub use eligibility::*;
pub use priority::*;
pub use schedule::*;
pub use specialists::*;
pub use table::*;
