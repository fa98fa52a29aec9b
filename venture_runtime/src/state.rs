//! Run state machine
//!
//! A run moves linearly through the stage machine
//! `Idle -> PersonasGenerated -> InterviewsDone -> MarketAnalyzed ->
//! FinancialsProjected -> ResultsReady`, with no back-transitions except a
//! full reset. Stage index and progress are monotonically non-decreasing
//! within a run; each completed stage contributes an even 20%.

use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, Result};

/// Completed-stage marker of a simulation run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Idle,
    PersonasGenerated,
    InterviewsDone,
    MarketAnalyzed,
    FinancialsProjected,
    ResultsReady,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Idle,
        Stage::PersonasGenerated,
        Stage::InterviewsDone,
        Stage::MarketAnalyzed,
        Stage::FinancialsProjected,
        Stage::ResultsReady,
    ];

    /// Zero-based position in the stage order
    pub fn index(&self) -> usize {
        match self {
            Stage::Idle => 0,
            Stage::PersonasGenerated => 1,
            Stage::InterviewsDone => 2,
            Stage::MarketAnalyzed => 3,
            Stage::FinancialsProjected => 4,
            Stage::ResultsReady => 5,
        }
    }

    /// Progress percent once this stage has completed
    pub fn progress(&self) -> u8 {
        (self.index() * 20) as u8
    }

    /// The stage that follows this one, if any
    pub fn next(&self) -> Option<Stage> {
        Stage::ALL.get(self.index() + 1).copied()
    }

    /// Linear machine: only the immediate successor is reachable
    pub fn can_transition_to(&self, next: Stage) -> bool {
        self.next() == Some(next)
    }
}

/// Mutable state of the single active run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunState {
    pub stage: Stage,
    pub progress: u8,
    pub running: bool,
}

impl RunState {
    pub fn new() -> Self {
        Self {
            stage: Stage::Idle,
            progress: 0,
            running: false,
        }
    }

    /// Mark a stage as completed.
    ///
    /// # Errors
    /// `OutOfOrder` unless `completed` is the immediate successor of the
    /// current stage. Progress monotonicity follows from linearity.
    pub fn advance_to(&mut self, completed: Stage) -> Result<()> {
        if !self.stage.can_transition_to(completed) {
            return Err(EngineError::OutOfOrder {
                from: self.stage,
                to: completed,
            });
        }
        self.stage = completed;
        self.progress = completed.progress();
        if completed == Stage::ResultsReady {
            self.running = false;
        }
        Ok(())
    }

    /// Back to idle; the only permitted backwards move.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn is_terminal(&self) -> bool {
        self.stage == Stage::ResultsReady
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = RunState::new();
        assert_eq!(state.stage, Stage::Idle);
        assert_eq!(state.progress, 0);
        assert!(!state.running);
    }

    #[test]
    fn test_progress_mapping_is_even() {
        assert_eq!(Stage::Idle.progress(), 0);
        assert_eq!(Stage::PersonasGenerated.progress(), 20);
        assert_eq!(Stage::InterviewsDone.progress(), 40);
        assert_eq!(Stage::MarketAnalyzed.progress(), 60);
        assert_eq!(Stage::FinancialsProjected.progress(), 80);
        assert_eq!(Stage::ResultsReady.progress(), 100);
    }

    #[test]
    fn test_full_linear_walk() {
        let mut state = RunState::new();
        state.running = true;

        let mut last_progress = 0;
        for stage in Stage::ALL.into_iter().skip(1) {
            state.advance_to(stage).unwrap();
            assert!(state.progress >= last_progress);
            last_progress = state.progress;
        }
        assert!(state.is_terminal());
        assert!(!state.running);
        assert_eq!(state.progress, 100);
    }

    #[test]
    fn test_skipping_a_stage_is_rejected() {
        let mut state = RunState::new();
        let result = state.advance_to(Stage::InterviewsDone);
        assert!(matches!(result, Err(EngineError::OutOfOrder { .. })));
        assert_eq!(state.stage, Stage::Idle);
    }

    #[test]
    fn test_no_back_transitions() {
        let mut state = RunState::new();
        state.advance_to(Stage::PersonasGenerated).unwrap();
        state.advance_to(Stage::InterviewsDone).unwrap();
        assert!(matches!(
            state.advance_to(Stage::PersonasGenerated),
            Err(EngineError::OutOfOrder { .. })
        ));
    }

    #[test]
    fn test_terminal_has_no_successor() {
        assert_eq!(Stage::ResultsReady.next(), None);
        let mut state = RunState::new();
        for stage in Stage::ALL.into_iter().skip(1) {
            state.advance_to(stage).unwrap();
        }
        assert!(matches!(
            state.advance_to(Stage::ResultsReady),
            Err(EngineError::OutOfOrder { .. })
        ));
    }

    #[test]
    fn test_reset_from_any_point() {
        let mut state = RunState::new();
        state.running = true;
        state.advance_to(Stage::PersonasGenerated).unwrap();

        state.reset();
        assert_eq!(state.stage, Stage::Idle);
        assert_eq!(state.progress, 0);
        assert!(!state.running);
    }
}
