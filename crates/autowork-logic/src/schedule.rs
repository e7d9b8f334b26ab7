//! Shift definitions and shift scoring.
//!
//! Larger colonies spread pawns over more shifts. A shift is 24 hourly
//! time blocks. Which shifts are available depends on the population
//! tier, with a separate tier list for night owls.
//!
//! Scoring a shift for a pawn:
//! * `+10` per partner already on the shift
//! * `+1/p` for every work type the pawn holds at priority `p`
//! * `-1/q` for every other pawn on the shift holding one of those work
//!   types at priority `q`, which spreads specialists across shifts

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::cadence::{
    DEFAULT_SCHEDULE_INTERVAL_HOURS, MAX_SCHEDULE_INTERVAL_HOURS, MIN_SCHEDULE_INTERVAL_HOURS,
};
use crate::constants::schedule::{HOURS, RELATION_BONUS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeAssignment {
    #[default]
    Anything,
    Work,
    Joy,
    Sleep,
}

impl TimeAssignment {
    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(TimeAssignment::Anything),
            'W' => Some(TimeAssignment::Work),
            'J' => Some(TimeAssignment::Joy),
            'S' => Some(TimeAssignment::Sleep),
            _ => None,
        }
    }

    fn to_char(self) -> char {
        match self {
            TimeAssignment::Anything => 'A',
            TimeAssignment::Work => 'W',
            TimeAssignment::Joy => 'J',
            TimeAssignment::Sleep => 'S',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("shift pattern must have {expected} hours, got {found}")]
    WrongLength { expected: usize, found: usize },
    #[error("unknown time assignment '{0}' in shift pattern")]
    UnknownBlock(char),
}

/// Day pattern every built-in shift is a rotation of.
const BASE_DAY: &str = "SSSSSSAAWWWWWWWWJJAAAASS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftDef {
    pub name: String,
    pub hours: Vec<TimeAssignment>,
}

impl ShiftDef {
    /// Parse a 24-character pattern of `S`leep/`W`ork/`J`oy/`A`nything.
    pub fn from_pattern(name: &str, pattern: &str) -> Result<Self, ScheduleError> {
        let found = pattern.chars().count();
        if found != HOURS {
            return Err(ScheduleError::WrongLength {
                expected: HOURS,
                found,
            });
        }
        let hours = pattern
            .chars()
            .map(|c| TimeAssignment::from_char(c).ok_or(ScheduleError::UnknownBlock(c)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: name.to_string(),
            hours,
        })
    }

    /// The base day shifted later by `offset` hours.
    pub fn rotated(name: &str, offset: usize) -> Self {
        let base: Vec<TimeAssignment> = BASE_DAY
            .chars()
            .filter_map(TimeAssignment::from_char)
            .collect();
        let hours = (0..HOURS)
            .map(|h| base[(h + HOURS - offset % HOURS) % HOURS])
            .collect();
        Self {
            name: name.to_string(),
            hours,
        }
    }

    pub fn pattern(&self) -> String {
        self.hours.iter().map(|t| t.to_char()).collect()
    }

    pub fn work_hours(&self) -> usize {
        self.hours.iter().filter(|&&t| t == TimeAssignment::Work).count()
    }
}

/// Shifts available from `min_population` pawns upward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftTier {
    pub min_population: u32,
    pub shifts: Vec<ShiftDef>,
}

/// The tier with the highest threshold not above `population`; the
/// lowest tier when the population is below every threshold.
pub fn tier_for(tiers: &[ShiftTier], population: u32) -> Option<&ShiftTier> {
    tiers
        .iter()
        .filter(|t| t.min_population <= population)
        .max_by_key(|t| t.min_population)
        .or_else(|| tiers.iter().min_by_key(|t| t.min_population))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSettings {
    pub enabled: bool,
    pub interval_hours: f32,
    pub tiers: Vec<ShiftTier>,
    pub night_owl_tiers: Vec<ShiftTier>,
    /// Trait name that routes a pawn to the night-owl tiers.
    pub night_owl_trait: String,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_hours: DEFAULT_SCHEDULE_INTERVAL_HOURS,
            tiers: vec![
                ShiftTier {
                    min_population: 0,
                    shifts: vec![ShiftDef::rotated("Day", 0)],
                },
                ShiftTier {
                    min_population: 6,
                    shifts: vec![ShiftDef::rotated("Day", 0), ShiftDef::rotated("Evening", 8)],
                },
                ShiftTier {
                    min_population: 12,
                    shifts: vec![
                        ShiftDef::rotated("Day", 0),
                        ShiftDef::rotated("Evening", 8),
                        ShiftDef::rotated("Night", 16),
                    ],
                },
            ],
            night_owl_tiers: vec![
                ShiftTier {
                    min_population: 0,
                    shifts: vec![ShiftDef::rotated("Owl", 12)],
                },
                ShiftTier {
                    min_population: 12,
                    shifts: vec![ShiftDef::rotated("Owl", 12), ShiftDef::rotated("Owl late", 16)],
                },
            ],
            night_owl_trait: "NightOwl".to_string(),
        }
    }
}

impl ScheduleSettings {
    pub fn clamp(&mut self) {
        self.interval_hours = if self.interval_hours.is_nan() {
            DEFAULT_SCHEDULE_INTERVAL_HOURS
        } else {
            self.interval_hours
                .clamp(MIN_SCHEDULE_INTERVAL_HOURS, MAX_SCHEDULE_INTERVAL_HOURS)
        };
    }
}

/// Score a shift for a pawn holding `own` priorities (indexed by work type).
///
/// The `1/p` term for the pawn's own work is the same on every shift, so
/// only the partner bonus and the overlap with pawns already on the shift
/// decide between shifts.
pub fn shift_score(own: &[u8], partners_on_shift: usize, others_on_shift: &[&[u8]]) -> f32 {
    let mut score = partners_on_shift as f32 * RELATION_BONUS;
    for (work_type, &p) in own.iter().enumerate() {
        if p == 0 {
            continue;
        }
        score += 1.0 / p as f32;
        for other in others_on_shift {
            match other.get(work_type) {
                Some(&q) if q > 0 => score -= 1.0 / q as f32,
                _ => {}
            }
        }
    }
    score
}

/// Index of the highest score; earlier shifts win ties.
pub fn best_shift(scores: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, &s) in scores.iter().enumerate() {
        match best {
            Some((_, b)) if s <= b => {}
            _ => best = Some((idx, s)),
        }
    }
    best.map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_roundtrip() {
        let shift = ShiftDef::from_pattern("Day", BASE_DAY).unwrap();
        assert_eq!(shift.pattern(), BASE_DAY);
        assert_eq!(shift.work_hours(), 8);
    }

    #[test]
    fn test_pattern_errors() {
        assert_eq!(
            ShiftDef::from_pattern("x", "SSS").unwrap_err(),
            ScheduleError::WrongLength { expected: 24, found: 3 }
        );
        assert_eq!(
            ShiftDef::from_pattern("x", "SSSSSSAAWWWWWWWWJJAAAASX").unwrap_err(),
            ScheduleError::UnknownBlock('X')
        );
    }

    #[test]
    fn test_rotation() {
        let evening = ShiftDef::rotated("Evening", 8);
        assert_eq!(evening.hours[16], TimeAssignment::Work);
        assert_eq!(evening.hours[8], TimeAssignment::Sleep);
        assert_eq!(ShiftDef::rotated("Day", 24), ShiftDef::rotated("Day", 0));
    }

    #[test]
    fn test_tier_for() {
        let tiers = ScheduleSettings::default().tiers;
        assert_eq!(tier_for(&tiers, 3).unwrap().shifts.len(), 1);
        assert_eq!(tier_for(&tiers, 6).unwrap().shifts.len(), 2);
        assert_eq!(tier_for(&tiers, 40).unwrap().shifts.len(), 3);
        assert!(tier_for(&[], 40).is_none());

        let high_only = vec![ShiftTier {
            min_population: 10,
            shifts: vec![ShiftDef::rotated("Day", 0)],
        }];
        assert_eq!(tier_for(&high_only, 2).unwrap().min_population, 10);
    }

    #[test]
    fn test_partner_bonus_dominates() {
        let own = [1u8, 0, 2];
        let crowded: [&[u8]; 1] = [&[1, 0, 2]];
        let with_partner = shift_score(&own, 1, &crowded);
        let empty = shift_score(&own, 0, &[]);
        assert!(with_partner > empty);
    }

    #[test]
    fn test_specialists_spread() {
        let own = [1u8, 0];
        let doctor: [&[u8]; 1] = [&[1, 0]];
        let hauler: [&[u8]; 1] = [&[0, 3]];
        let scores = [shift_score(&own, 0, &doctor), shift_score(&own, 0, &hauler)];
        assert_eq!(best_shift(&scores), Some(1));
    }

    #[test]
    fn test_own_work_does_not_pick_the_shift() {
        // Empty shifts tie whatever the pawn does
        let busy = [1u8, 1, 2];
        let idle = [0u8, 0, 0];
        for own in [&busy[..], &idle[..]] {
            let scores = [shift_score(own, 0, &[]), shift_score(own, 0, &[])];
            assert_eq!(scores[0], scores[1]);
            assert_eq!(best_shift(&scores), Some(0));
        }
        assert_eq!(shift_score(&busy, 0, &[]), 2.5);
    }

    #[test]
    fn test_best_shift_ties_prefer_first() {
        assert_eq!(best_shift(&[1.0, 1.0, 0.5]), Some(0));
        assert_eq!(best_shift(&[]), None);
    }
}
