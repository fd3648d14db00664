//! Error types of the volume pipeline.
//!
//! A ray missing the volume is not an error, the compositor reports it
//! as a discarded fragment (`None`).

use std::time::Duration;

use thiserror::Error;

/// Everything that can go wrong between fetching volume bytes and
/// having a texture ready to sample.
#[derive(Error, Debug)]
pub enum VolumeError {
    /// Header declares a sample type other than `1` (f32).
    #[error("unsupported data type {data_type}, expected 1 (float32)")]
    UnsupportedFormat { data_type: u32 },

    /// Byte sequence is shorter than header + payload.
    #[error("truncated payload: expected {expected} bytes, got {actual}")]
    TruncatedPayload { expected: usize, actual: usize },

    /// Texture resource could not be created.
    #[error("texture provision failed for {size:?} volume: {reason}")]
    TextureProvisionFailure { size: [usize; 3], reason: String },

    /// Voxel buffer length does not match the dimensions.
    #[error("voxel count mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Source has no volume under this identifier.
    #[error("volume '{0}' not found")]
    NotFound(String),

    /// Identifier cannot name a volume (empty, path components).
    #[error("invalid volume identifier '{0}'")]
    InvalidIdentifier(String),

    /// Load did not finish in time.
    #[error("load timed out after {0:?}")]
    Timeout(Duration),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, VolumeError>;
