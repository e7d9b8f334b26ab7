//! Common components used by every pawn.

use serde::{Deserialize, Serialize};

/// Name component for pawns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Name {
    pub given: String,
    pub family: String,
    pub nickname: Option<String>,
}

impl Name {
    pub fn new(given: impl Into<String>, family: impl Into<String>) -> Self {
        Self {
            given: given.into(),
            family: family.into(),
            nickname: None,
        }
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.given, self.family)
    }

    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.given)
    }
}
