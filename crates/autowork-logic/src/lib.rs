//! Pure work-assignment logic for autowork.
//!
//! This crate holds the rule model and the scoring algorithms that decide
//! which pawn gets which job at what priority. Functions take plain data
//! and return results; the ECS host, caching and the update loop live in
//! `autowork-core`.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`cadence`] | Game time and the "run every N hours" gate |
//! | [`config`] | Whole configuration surface, defaults, clamping, validation |
//! | [`constants`] | Priority levels and clamp ranges |
//! | [`dedicated`] | Dedicated-worker counts and weighted candidate scoring |
//! | [`defaults`] | Vanilla work types, skills and the default rule set |
//! | [`defs`] | Name-keyed definition registries |
//! | [`learning`] | Learning-rate thresholds and normalization |
//! | [`passion`] | Passion definitions and the normalized passion score table |
//! | [`pawn`] | Pawn ids, classes, weapons, filter facts |
//! | [`rules`] | Tri-state assignment rules and their resolution |
//! | [`schedule`] | Shift definitions, population tiers, shift scoring |
//! | [`specialization`] | Doctor/hunter roles and doctor demand |
//! | [`work`] | Work types and the work catalog |

pub mod cadence;
pub mod config;
pub mod constants;
pub mod dedicated;
pub mod defaults;
pub mod defs;
pub mod learning;
pub mod passion;
pub mod pawn;
pub mod rules;
pub mod schedule;
pub mod specialization;
pub mod work;
