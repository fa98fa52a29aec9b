//! Hypothesis store
//!
//! An ordered, validated collection of the hypotheses a simulation run
//! evaluates. User-authored hypotheses must carry related-block tags;
//! the built-in default set does not.

pub mod storage;
pub mod types;

pub use storage::{require_hypothesis, HypothesisStorage, InMemoryHypothesisStorage};
pub use types::{Hypothesis, HypothesisId, HypothesisOrigin};
