//! Save/Load of engine state and settings
//!
//! Runtime state (management exclusions, last-run timestamps) is written
//! as versioned bincode alongside the host's save. Settings are plain
//! JSON so they can be edited and shared; they are clamped on the way in
//! and on the way out.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use autowork_logic::config::{validate_settings, Settings};

use crate::management::ManagementState;

/// Version number for save file format (increment when format changes)
pub const SAVE_VERSION: u32 = 1;

/// Serializable snapshot of the engine's runtime state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version
    pub version: u32,
    pub management: ManagementState,
    /// Game hour of the last priority pass
    pub priority_last_run: Option<f64>,
    /// Game hour of the last schedule pass
    pub schedule_last_run: Option<f64>,
}

/// Errors that can occur during save/load
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Bincode(#[from] Box<bincode::ErrorKind>),
    #[error("Settings error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Write engine state to a writer
pub fn save_state<W: Write>(
    writer: W,
    management: &ManagementState,
    priority_last_run: Option<f64>,
    schedule_last_run: Option<f64>,
) -> Result<(), SaveError> {
    let data = SaveData {
        version: SAVE_VERSION,
        management: management.clone(),
        priority_last_run,
        schedule_last_run,
    };
    bincode::serialize_into(writer, &data)?;
    Ok(())
}

/// Read engine state written by [`save_state`]
pub fn load_state<R: Read>(reader: R) -> Result<SaveData, SaveError> {
    let data: SaveData = bincode::deserialize_from(reader)?;
    if data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: data.version,
        });
    }
    Ok(data)
}

/// Write settings as pretty JSON, clamped first.
pub fn save_settings<W: Write>(writer: W, settings: &Settings) -> Result<(), SaveError> {
    let mut settings = settings.clone();
    settings.clamp();
    serde_json::to_writer_pretty(writer, &settings)?;
    Ok(())
}

/// Read settings from JSON. Missing fields take their defaults; the
/// result is clamped and structural problems are logged, not rejected.
pub fn load_settings<R: Read>(reader: R) -> Result<Settings, SaveError> {
    let mut settings: Settings = serde_json::from_reader(reader)?;
    settings.clamp();
    for issue in validate_settings(&settings) {
        log::warn!("Loaded settings: {}", issue);
    }
    Ok(settings)
}
