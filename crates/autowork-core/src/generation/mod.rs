//! Generation - procedural colonies for the harness, benchmarks and tests

mod colony;
mod names;

pub use colony::*;
pub use names::*;
