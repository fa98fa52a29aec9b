//! Error types for the simulation core

use thiserror::Error;

/// Main error type for the simulation core
#[derive(Error, Debug)]
pub enum SimulationError {
    /// A hypothesis failed validation on creation
    #[error("Invalid hypothesis: {0}")]
    InvalidHypothesis(String),

    /// Confidence construction failed
    #[error("Confidence error: {0}")]
    Confidence(#[from] crate::evaluation::ConfidenceError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid state or operation
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Not found
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for simulation core operations
pub type Result<T> = std::result::Result<T, SimulationError>;
