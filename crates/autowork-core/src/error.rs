//! Engine error types

use thiserror::Error;

use autowork_logic::rules::RuleError;

/// Errors that abort a pass before any priority is written
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("configuration invalid: {0}")]
    Config(#[from] RuleError),
}
