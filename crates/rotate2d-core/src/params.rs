//! Persisted alignment parameters.
//!
//! The saved record is a flat JSON object:
//!
//! ```text
//! {
//!   "x_offset": 0,
//!   "y_offset": 0,
//!   "x_center": 0,
//!   "y_center": 0,
//!   "angle": 0.0,
//!   "flip_lr": false,
//!   "flip_ud": false
//! }
//! ```
//!
//! Values are not range-checked; an out-of-range record reproduces the same
//! view when loaded back.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::RigidTransform;

/// Flat on-disk form of a [`RigidTransform`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ParameterRecord {
    pub x_offset: i64,
    pub y_offset: i64,
    pub x_center: i64,
    pub y_center: i64,
    pub angle: f64,
    pub flip_lr: bool,
    pub flip_ud: bool,
}

impl From<&RigidTransform> for ParameterRecord {
    fn from(t: &RigidTransform) -> Self {
        Self {
            x_offset: t.offset_x,
            y_offset: t.offset_y,
            x_center: t.center_x,
            y_center: t.center_y,
            angle: t.angle_degrees,
            flip_lr: t.flip_lr,
            flip_ud: t.flip_ud,
        }
    }
}

impl From<ParameterRecord> for RigidTransform {
    fn from(r: ParameterRecord) -> Self {
        Self {
            offset_x: r.x_offset,
            offset_y: r.y_offset,
            center_x: r.x_center,
            center_y: r.y_center,
            angle_degrees: r.angle,
            flip_lr: r.flip_lr,
            flip_ud: r.flip_ud,
        }
    }
}

/// Serialize a transform as pretty-printed JSON (2-space indent).
pub fn encode_params(transform: &RigidTransform) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ParameterRecord::from(transform))?)
}

/// Parse a transform from its JSON record.
///
/// # Errors
///
/// Returns [`crate::AlignError::Params`] if a field is missing or has the
/// wrong type.
pub fn decode_params(json: &str) -> Result<RigidTransform> {
    let record: ParameterRecord = serde_json::from_str(json)?;
    Ok(record.into())
}

/// Write the parameter record to `path`, replacing any existing file.
pub fn save_params(path: impl AsRef<Path>, transform: &RigidTransform) -> Result<()> {
    let json = encode_params(transform)?;
    fs::write(path, json)?;
    Ok(())
}

/// Read a parameter record from `path`.
pub fn load_params(path: impl AsRef<Path>) -> Result<RigidTransform> {
    let json = fs::read_to_string(path)?;
    decode_params(&json)
}
