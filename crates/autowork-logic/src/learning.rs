//! Learning-rate based priority boosts.
//!
//! A pawn without a passion for a work type can still be a fast learner
//! at it (traits, implants). When enabled, learning rates above the
//! configured thresholds earn the major/minor learning priorities.

use serde::{Deserialize, Serialize};

use crate::constants::learning::*;

/// Map `value` from `[min, max]` onto `[0, 1]`. An empty or non-finite
/// span maps to 0.
pub fn normalize_span(value: f32, min: f32, max: f32) -> f32 {
    let span = max - min;
    if !(span > 0.0) || !span.is_finite() {
        return 0.0;
    }
    ((value - min) / span).clamp(0.0, 1.0)
}

/// Normalize every value against the min/max of the slice.
pub fn normalize_all(values: &[f32]) -> Vec<f32> {
    let min = values.iter().copied().fold(f32::INFINITY, f32::min);
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    values.iter().map(|&v| normalize_span(v, min, max)).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningRateSettings {
    pub enabled: bool,
    /// Compare the colony-normalized rate (0..1) instead of the absolute one.
    pub use_normalized: bool,
    pub major_threshold: f32,
    pub minor_threshold: f32,
    pub major_priority: u8,
    pub minor_priority: u8,
}

impl Default for LearningRateSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            use_normalized: false,
            major_threshold: DEFAULT_MAJOR_THRESHOLD,
            minor_threshold: DEFAULT_MINOR_THRESHOLD,
            major_priority: 2,
            minor_priority: 3,
        }
    }
}

impl LearningRateSettings {
    pub fn clamp(&mut self, max_priority: u8) {
        let (lo, hi) = if self.use_normalized {
            (0.0, 1.0)
        } else {
            (THRESHOLD_MIN, THRESHOLD_MAX)
        };
        self.major_threshold = self.major_threshold.clamp(lo, hi);
        self.minor_threshold = self.minor_threshold.clamp(lo, hi);
        self.major_priority = self.major_priority.clamp(1, max_priority);
        self.minor_priority = self.minor_priority.clamp(1, max_priority);
    }

    /// Priority earned by a learning rate, major threshold first.
    pub fn priority_for(&self, rate: f32) -> Option<u8> {
        if !self.enabled {
            return None;
        }
        if rate > self.major_threshold {
            Some(self.major_priority)
        } else if rate > self.minor_threshold {
            Some(self.minor_priority)
        } else {
            None
        }
    }
}
