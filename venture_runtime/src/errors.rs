//! Error types for the simulation runtime

use thiserror::Error;

use crate::state::Stage;

/// Main error type for the stage sequencer
#[derive(Error, Debug)]
pub enum EngineError {
    /// `start` was called while a run is in flight
    #[error("A simulation run is already in progress")]
    AlreadyRunning,

    /// A stage tried to advance out of order
    #[error("Out-of-order stage transition: {from:?} -> {to:?}")]
    OutOfOrder { from: Stage, to: Stage },

    /// The run was cancelled by a restart; consumed inside the run task
    #[error("Simulation run cancelled")]
    Cancelled,

    /// Domain-layer errors
    #[error(transparent)]
    Core(#[from] venture_core::SimulationError),
}

/// Result type alias for runtime operations
pub type Result<T> = std::result::Result<T, EngineError>;
