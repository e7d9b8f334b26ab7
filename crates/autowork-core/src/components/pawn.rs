//! Pawn components: identity, health state, activity, equipment, traits.

use serde::{Deserialize, Serialize};

use autowork_logic::pawn::{PawnId, Weapon};

/// Marker component identifying an entity as a pawn, carrying its stable id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pawn {
    pub id: PawnId,
}

/// Health and containment state
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub dead: bool,
    pub downed: bool,
    pub mental_break: bool,
    /// Locked in a cell or otherwise held
    pub contained: bool,
    /// Injured or ill; still walking around if not downed
    pub injured: bool,
}

impl Vitals {
    /// Alive, free, sane and on its feet
    pub fn capable_of_work(&self) -> bool {
        !self.dead && !self.downed && !self.mental_break && !self.contained
    }

    /// Hurt but still able to work
    pub fn recovering(&self) -> bool {
        self.injured && self.capable_of_work()
    }

    /// Counts towards the doctor workload
    pub fn needs_treatment(&self) -> bool {
        !self.dead && (self.downed || self.injured)
    }
}

/// What the pawn is doing right now
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Current job label; `None` means the pawn is idle
    pub job: Option<String>,
}

impl Activity {
    pub fn idle() -> Self {
        Self { job: None }
    }

    pub fn working(job: impl Into<String>) -> Self {
        Self {
            job: Some(job.into()),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.job.is_none()
    }
}

/// Equipped primary weapon category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub primary: Weapon,
}

/// Named character traits (e.g. "NightOwl")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Traits(pub Vec<String>);

impl Traits {
    pub fn has(&self, name: &str) -> bool {
        self.0.iter().any(|t| t == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vitals_capability() {
        assert!(Vitals::default().capable_of_work());
        let downed = Vitals {
            downed: true,
            injured: true,
            ..Default::default()
        };
        assert!(!downed.capable_of_work());
        assert!(!downed.recovering());
        assert!(downed.needs_treatment());

        let limping = Vitals {
            injured: true,
            ..Default::default()
        };
        assert!(limping.recovering());

        let dead = Vitals {
            dead: true,
            injured: true,
            ..Default::default()
        };
        assert!(!dead.needs_treatment());
    }

    #[test]
    fn test_activity_idle() {
        assert!(Activity::idle().is_idle());
        assert!(!Activity::working("Mining").is_idle());
    }
}
