//! Error types for the alignment engine.

use std::fmt;

use thiserror::Error;

/// Which of the two volumes an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum VolumeRole {
    /// The reference volume, held stationary.
    Fixed,
    /// The volume being aligned onto the fixed one.
    Moving,
}

impl fmt::Display for VolumeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolumeRole::Fixed => f.write_str("fixed"),
            VolumeRole::Moving => f.write_str("moving"),
        }
    }
}

/// Errors raised at the boundaries of the engine.
///
/// Geometry and arithmetic never fail; these variants only cover missing
/// volumes, bad indices, bad sources and parameter file problems.
#[derive(Debug, Error)]
pub enum AlignError {
    /// A render was requested before both volumes were attached.
    #[error("The {role} volume is not loaded")]
    VolumeNotLoaded { role: VolumeRole },

    /// An index lies outside the extent of a volume axis.
    #[error("Index {index} is out of range for the {role} volume {axis} axis (extent {extent})")]
    IndexOutOfRange {
        role: VolumeRole,
        axis: char,
        index: usize,
        extent: usize,
    },

    /// Downsample factors start at 1.
    #[error("Invalid downsample factor: {0} (must be at least 1)")]
    InvalidDownsample(usize),

    /// The display quantile of a composite is zero or not finite.
    #[error("Degenerate display range: 90th percentile is {0}")]
    DegenerateDisplayRange(f32),

    /// A volume backend could not be opened or read.
    #[error("Malformed volume source: {0}")]
    MalformedVolumeSource(String),

    /// The parameter record could not be encoded or decoded.
    #[error("Invalid parameter record: {0}")]
    Params(String),

    /// I/O error while reading or writing a parameter file.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for AlignError {
    fn from(err: serde_json::Error) -> Self {
        AlignError::Params(err.to_string())
    }
}

impl From<std::io::Error> for AlignError {
    fn from(err: std::io::Error) -> Self {
        AlignError::Io(err.to_string())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AlignError>;
