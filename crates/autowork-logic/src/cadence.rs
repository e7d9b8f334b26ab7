//! Game time and update cadence.
//!
//! The engine is driven by host ticks. A pass runs once the game time
//! elapsed since the previous run reaches the configured interval;
//! earlier calls are a no-op.

use serde::{Deserialize, Serialize};

use crate::constants::cadence::{HOURS_PER_DAY, MAX_UPDATES_PER_DAY, MIN_UPDATES_PER_DAY};

/// Point on the simulation clock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameTime {
    pub day: u32,
    pub hour: f32,
}

impl GameTime {
    pub fn new(day: u32, hour: f32) -> Self {
        Self { day, hour }
    }

    pub fn from_hours(total: f64) -> Self {
        let total = total.max(0.0);
        let day = (total / HOURS_PER_DAY).floor();
        Self {
            day: day as u32,
            hour: (total - day * HOURS_PER_DAY) as f32,
        }
    }

    /// Hours since day 0, hour 0.
    pub fn total_hours(&self) -> f64 {
        self.day as f64 * HOURS_PER_DAY + self.hour as f64
    }

    /// Hour of day as a block index (0..24).
    pub fn hour_index(&self) -> usize {
        (self.hour.max(0.0) as usize).min(23)
    }
}

/// Interval in hours for `updates_per_day` runs a day.
pub fn interval_for(updates_per_day: u32) -> f64 {
    HOURS_PER_DAY / updates_per_day.clamp(MIN_UPDATES_PER_DAY, MAX_UPDATES_PER_DAY) as f64
}

/// Tracks when a recurring pass last ran.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cadence {
    pub interval_hours: f64,
    pub last_run: Option<f64>,
}

impl Cadence {
    pub fn new(interval_hours: f64) -> Self {
        Self {
            interval_hours,
            last_run: None,
        }
    }

    /// Due when never run, or when the interval has elapsed. A clock that
    /// went backwards (an older save was loaded) also makes the pass due.
    pub fn is_due(&self, now: f64) -> bool {
        match self.last_run {
            None => true,
            Some(last) => now < last || now - last >= self.interval_hours - 1e-9,
        }
    }

    pub fn mark(&mut self, now: f64) {
        self.last_run = Some(now);
    }

    pub fn hours_until_due(&self, now: f64) -> f64 {
        match self.last_run {
            None => 0.0,
            Some(last) => (last + self.interval_hours - now).max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_for() {
        assert_eq!(interval_for(2), 12.0);
        assert_eq!(interval_for(0), 24.0);
        assert_eq!(interval_for(480), 0.5);
    }

    #[test]
    fn test_cadence_gate() {
        let mut c = Cadence::new(interval_for(2));
        assert!(c.is_due(0.0));
        c.mark(0.0);
        assert!(!c.is_due(6.0));
        assert!(c.is_due(12.0));
        assert_eq!(c.hours_until_due(6.0), 6.0);
    }

    #[test]
    fn test_clock_rewind_is_due() {
        let mut c = Cadence::new(12.0);
        c.mark(100.0);
        assert!(c.is_due(50.0));
    }

    #[test]
    fn test_game_time_hours() {
        let t = GameTime::new(2, 6.5);
        assert_eq!(t.total_hours(), 54.5);
        assert_eq!(GameTime::from_hours(54.5), t);
        assert_eq!(t.hour_index(), 6);
    }
}
