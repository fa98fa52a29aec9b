//! Venture Simulation Runtime
//!
//! Drives `venturesim-core` through a timed, cancellable five-stage run:
//! - Stage Sequencer: strictly ordered stages over exclusive run state
//! - Cooperative cancellation so a restart never races a stale continuation
//! - Broadcast event stream for run/stage progress

// Module declarations
pub mod cancellation;
pub mod engine;
pub mod errors;
pub mod state;

// Re-export main types
pub use cancellation::{CancellationToken, CancellationTokenSource};

pub use engine::{
    EngineConfig, RunId, RunSnapshot, SimulationEngine, SimulationEvent, StageDelays,
};

pub use errors::{EngineError, Result};

pub use state::{RunState, Stage};

/// Version of the simulation runtime crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the simulation runtime
pub fn init() {
    tracing::info!("Venture Simulation Runtime v{}", VERSION);
}
