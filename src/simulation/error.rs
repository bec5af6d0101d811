//! Error kinds surfaced by the simulation core.
//!
//! Every variant is a programmer or configuration error: nothing here is retried or
//! recovered from inside the core.

use thiserror::Error;

/// Errors emitted by the simulation core.
#[derive(Debug, Error)]
pub enum Error {
    /// Network dimensions that cannot be used (zero-sized layers, mismatched shapes).
    #[error("invalid network dimensions: {0}")]
    InvalidDimensions(String),
    /// An observation vector whose length does not match the brain's input layer.
    #[error("observation has {actual} values, brain expects {expected}")]
    ObservationSize {
        /// Input size of the brain.
        expected: usize,
        /// Length of the rejected observation.
        actual: usize,
    },
    /// Configuration values the simulation cannot run with.
    #[error("invalid parameters: {0}")]
    InvalidParams(&'static str),
    /// Reading or writing a parameter file failed.
    #[error("parameter file error: {0}")]
    Io(#[from] std::io::Error),
    /// A parameter file could not be (de)serialized.
    #[error("parameter format error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used across the simulation modules.
pub type Result<T, E = Error> = std::result::Result<T, E>;
