//! Venture Simulation Core
//!
//! Domain layer for the startup simulation:
//! - Hypothesis store with validation and an ordered storage seam
//! - Deterministic customer-persona cohort
//! - Virtual interview script and simulator
//! - Market analysis and financial projection
//! - Rule-table hypothesis evaluation
//!
//! Orchestration (stage sequencing, timers, cancellation) lives in the
//! `venturesim-runtime` crate.

// Module declarations
pub mod errors;
pub mod evaluation;
pub mod financial;
pub mod hypothesis;
pub mod interview;
pub mod market;
pub mod persona;
pub mod report;

// Re-export main types
pub use errors::{Result, SimulationError};

pub use hypothesis::{
    require_hypothesis, Hypothesis, HypothesisId, HypothesisOrigin, HypothesisStorage,
    InMemoryHypothesisStorage,
};

pub use persona::{Persona, PersonaId, Segment};

pub use interview::{
    InterviewQuestion, InterviewResponse, InterviewScript, QuestionKind, Sentiment,
};

pub use market::{CompetitionLevel, MarketSnapshot};

pub use financial::{
    FinancialAssumptions, FinancialProjection, MonthlyFigures, ProjectionMetrics,
};

pub use evaluation::{
    Confidence, ConfidenceError, EvaluationRule, Evaluator, RuleTable, SimulationResult, Verdict,
};

pub use report::{RunReport, RunSummary};
