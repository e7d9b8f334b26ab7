//! Engine constants - priority levels, cadence bounds, clamp ranges.
//!
//! Plain numeric constants shared by the rule model, the scoring code
//! and the engine. Anything user-editable is clamped into these ranges
//! by [`crate::config::Settings::clamp`].

pub mod priorities {
    /// Work type is disabled for the pawn.
    pub const DISABLED: u8 = 0;
    /// Most urgent priority.
    pub const HIGHEST: u8 = 1;
    /// Number of priority levels the vanilla host exposes.
    pub const DEFAULT_LEVELS: u8 = 4;
    /// Fewest levels a host may expose.
    pub const MIN_LEVELS: u8 = 4;
    /// Most levels a host may expose (extended priority mods).
    pub const MAX_LEVELS: u8 = 9;
}

pub mod cadence {
    pub const HOURS_PER_DAY: f64 = 24.0;
    pub const MIN_UPDATES_PER_DAY: u32 = 1;
    pub const MAX_UPDATES_PER_DAY: u32 = 48;
    pub const DEFAULT_UPDATES_PER_DAY: u32 = 8;
    pub const MIN_CACHE_TTL_HOURS: f32 = 0.25;
    pub const MAX_CACHE_TTL_HOURS: f32 = 24.0;
    pub const DEFAULT_CACHE_TTL_HOURS: f32 = 1.0;
    pub const MIN_SCHEDULE_INTERVAL_HOURS: f32 = 1.0;
    pub const MAX_SCHEDULE_INTERVAL_HOURS: f32 = 24.0;
    pub const DEFAULT_SCHEDULE_INTERVAL_HOURS: f32 = 2.0;
}

pub mod dedicated {
    pub const CONSTANT_MIN: u32 = 1;
    pub const CONSTANT_MAX: u32 = 10;
    pub const CONSTANT_DEFAULT: u32 = 1;
    pub const WORK_TYPE_RATIO_MIN: f32 = 0.05;
    pub const WORK_TYPE_RATIO_MAX: f32 = 2.0;
    pub const WORK_TYPE_RATIO_DEFAULT: f32 = 0.1;
    pub const CAPABLE_RATIO_MIN: f32 = 0.1;
    pub const CAPABLE_RATIO_MAX: f32 = 5.0;
    pub const CAPABLE_RATIO_DEFAULT: f32 = 0.25;
    pub const PAWN_COUNT_RATIO_MIN: f32 = 0.1;
    pub const PAWN_COUNT_RATIO_MAX: f32 = 5.0;
    pub const PAWN_COUNT_RATIO_DEFAULT: f32 = 0.25;
    /// Scoring weights (skill, passion, learning rate, workload).
    pub const WEIGHT_MIN: f32 = 0.0;
    pub const WEIGHT_MAX: f32 = 5.0;
}

pub mod learning {
    pub const THRESHOLD_MIN: f32 = 0.0;
    pub const THRESHOLD_MAX: f32 = 5.0;
    pub const DEFAULT_MAJOR_THRESHOLD: f32 = 1.75;
    pub const DEFAULT_MINOR_THRESHOLD: f32 = 1.25;
}

pub mod schedule {
    /// Score bonus for each partner already on a shift.
    pub const RELATION_BONUS: f32 = 10.0;
    pub const HOURS: usize = 24;
}
