//! Stage sequencer
//!
//! Drives a single simulation run through the five ordered stages: persona
//! generation, interviews, market analysis, financial projection, result
//! analysis. At most one run is active per engine; `start` rejects overlap
//! and `restart` cancels any in-flight run before clearing state.
//!
//! Every stage commits its output to the shared run state before the next
//! stage reads it. The inter-stage delay is the only suspension point and
//! races against the run's cancellation token, so a continuation that lost
//! a restart can never write stale data: commits re-check the token under
//! the state write lock.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use venture_core::{
    financial, interview, market, persona, Evaluator, FinancialAssumptions, FinancialProjection,
    HypothesisStorage, InterviewScript, MarketSnapshot, Persona, RuleTable, RunReport,
    SimulationResult,
};

use crate::cancellation::{CancellationToken, CancellationTokenSource};
use crate::errors::{EngineError, Result};
use crate::state::{RunState, Stage};

/// Unique identifier for one simulation run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pauses between stage completions, modeling interview/analysis time
#[derive(Clone, Debug)]
pub struct StageDelays {
    pub after_personas: Duration,
    pub after_interviews: Duration,
    pub after_market: Duration,
    pub after_financials: Duration,
}

impl Default for StageDelays {
    fn default() -> Self {
        Self {
            after_personas: Duration::from_secs(2),
            after_interviews: Duration::from_secs(3),
            after_market: Duration::from_secs(2),
            after_financials: Duration::from_secs(2),
        }
    }
}

impl StageDelays {
    /// No pauses at all; useful for tests and headless batch runs
    pub fn none() -> Self {
        Self {
            after_personas: Duration::ZERO,
            after_interviews: Duration::ZERO,
            after_market: Duration::ZERO,
            after_financials: Duration::ZERO,
        }
    }
}

/// Engine configuration
#[derive(Clone, Debug, Default)]
pub struct EngineConfig {
    pub delays: StageDelays,
    pub assumptions: FinancialAssumptions,
    /// Evaluation rules; `None` binds the reference rules to the stored
    /// hypothesis list at run start
    pub rules: Option<RuleTable>,
}

/// Events emitted over the run's broadcast channel
#[derive(Clone, Debug, Serialize)]
pub enum SimulationEvent {
    RunStarted {
        run_id: RunId,
    },
    StageCompleted {
        run_id: RunId,
        stage: Stage,
        progress: u8,
    },
    RunCompleted {
        run_id: RunId,
    },
    RunRestarted {
        previous: Option<RunId>,
    },
}

/// Transient collections owned by the active run
#[derive(Debug, Default)]
struct RunShared {
    run_id: Option<RunId>,
    state: RunState,
    personas: Vec<Persona>,
    market: Option<MarketSnapshot>,
    financials: Option<FinancialProjection>,
    results: Vec<SimulationResult>,
    report: Option<RunReport>,
}

impl RunShared {
    fn clear(&mut self) {
        self.run_id = None;
        self.state.reset();
        self.personas.clear();
        self.market = None;
        self.financials = None;
        self.results.clear();
        self.report = None;
    }
}

/// Read-only snapshot of the run state and its collections
#[derive(Clone, Debug, Serialize)]
pub struct RunSnapshot {
    pub run_id: Option<RunId>,
    pub stage: Stage,
    pub progress: u8,
    pub running: bool,
    pub personas: Vec<Persona>,
    pub market: Option<MarketSnapshot>,
    pub financials: Option<FinancialProjection>,
    pub results: Vec<SimulationResult>,
    pub report: Option<RunReport>,
}

/// The stage sequencer. One active run at a time.
pub struct SimulationEngine {
    storage: Arc<dyn HypothesisStorage>,
    config: EngineConfig,
    shared: Arc<RwLock<RunShared>>,
    cancel: Mutex<Option<CancellationTokenSource>>,
    events: broadcast::Sender<SimulationEvent>,
}

impl SimulationEngine {
    pub fn new(storage: Arc<dyn HypothesisStorage>) -> Self {
        Self::with_config(storage, EngineConfig::default())
    }

    pub fn with_config(storage: Arc<dyn HypothesisStorage>, config: EngineConfig) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            storage,
            config,
            shared: Arc::new(RwLock::new(RunShared::default())),
            cancel: Mutex::new(None),
            events,
        }
    }

    /// Subscribe to run events. Lagging receivers lose old events.
    pub fn subscribe(&self) -> broadcast::Receiver<SimulationEvent> {
        self.events.subscribe()
    }

    /// Snapshot the run state and everything it has produced so far.
    pub async fn snapshot(&self) -> RunSnapshot {
        let shared = self.shared.read().await;
        RunSnapshot {
            run_id: shared.run_id,
            stage: shared.state.stage,
            progress: shared.state.progress,
            running: shared.state.running,
            personas: shared.personas.clone(),
            market: shared.market.clone(),
            financials: shared.financials.clone(),
            results: shared.results.clone(),
            report: shared.report.clone(),
        }
    }

    /// Start a new run.
    ///
    /// # Errors
    /// `AlreadyRunning` if a run is in flight; call [`restart`](Self::restart)
    /// first or wait for completion.
    pub async fn start(&self) -> Result<RunId> {
        let run_id = RunId::new();
        {
            let mut shared = self.shared.write().await;
            if shared.state.running {
                return Err(EngineError::AlreadyRunning);
            }
            shared.clear();
            shared.run_id = Some(run_id);
            shared.state.running = true;
        }

        let source = CancellationTokenSource::new();
        let token = source.token();
        if let Ok(mut slot) = self.cancel.lock() {
            *slot = Some(source);
        }

        tracing::info!(%run_id, "simulation run started");
        self.emit(SimulationEvent::RunStarted { run_id });

        let shared = self.shared.clone();
        let storage = self.storage.clone();
        let config = self.config.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome =
                run_to_completion(&shared, &*storage, &config, &events, &token, run_id).await;
            match outcome {
                Ok(()) => tracing::info!(%run_id, "simulation run completed"),
                Err(EngineError::Cancelled) => {
                    tracing::debug!(%run_id, "simulation run cancelled")
                }
                Err(err) => {
                    tracing::error!(%run_id, error = %err, "simulation run failed");
                    let mut guard = shared.write().await;
                    if guard.run_id == Some(run_id) {
                        guard.state.running = false;
                    }
                }
            }
        });

        Ok(run_id)
    }

    /// Cancel any in-flight run and reset to idle, discarding all
    /// transient collections. Idempotent: restarting an idle engine is a
    /// no-op apart from the emitted event.
    pub async fn restart(&self) {
        if let Ok(mut slot) = self.cancel.lock() {
            if let Some(source) = slot.take() {
                source.cancel();
            }
        }

        let previous = {
            let mut shared = self.shared.write().await;
            let previous = shared.run_id;
            shared.clear();
            previous
        };

        tracing::info!(?previous, "simulation reset");
        self.emit(SimulationEvent::RunRestarted { previous });
    }

    fn emit(&self, event: SimulationEvent) {
        // Nobody listening is fine
        let _ = self.events.send(event);
    }
}

/// Commit a stage's output under the write lock, re-checking cancellation
/// so a continuation that lost a restart never writes stale state.
async fn commit<F>(
    shared: &Arc<RwLock<RunShared>>,
    token: &CancellationToken,
    apply: F,
) -> Result<()>
where
    F: FnOnce(&mut RunShared) -> Result<()>,
{
    let mut guard = shared.write().await;
    if token.is_cancelled() {
        return Err(EngineError::Cancelled);
    }
    apply(&mut guard)
}

/// Cancellation-aware inter-stage pause
async fn pause(token: &CancellationToken, delay: Duration) -> Result<()> {
    if delay.is_zero() {
        return if token.is_cancelled() {
            Err(EngineError::Cancelled)
        } else {
            Ok(())
        };
    }
    tokio::select! {
        _ = tokio::time::sleep(delay) => Ok(()),
        _ = token.cancelled() => Err(EngineError::Cancelled),
    }
}

async fn run_to_completion(
    shared: &Arc<RwLock<RunShared>>,
    storage: &dyn HypothesisStorage,
    config: &EngineConfig,
    events: &broadcast::Sender<SimulationEvent>,
    token: &CancellationToken,
    run_id: RunId,
) -> Result<()> {
    let emit_stage = |stage: Stage| {
        let _ = events.send(SimulationEvent::StageCompleted {
            run_id,
            stage,
            progress: stage.progress(),
        });
        tracing::info!(%run_id, ?stage, progress = stage.progress(), "stage completed");
    };

    let hypotheses = storage.list_hypotheses().await?;

    // Stage 1: persona generation
    let mut personas = persona::generate();
    commit(shared, token, |s| {
        s.state.advance_to(Stage::PersonasGenerated)?;
        s.personas = personas.clone();
        Ok(())
    })
    .await?;
    emit_stage(Stage::PersonasGenerated);
    pause(token, config.delays.after_personas).await?;

    // Stage 2: interviews
    let script = InterviewScript::standard(&hypotheses);
    interview::conduct(&mut personas, &script);
    commit(shared, token, |s| {
        s.state.advance_to(Stage::InterviewsDone)?;
        s.personas = personas.clone();
        Ok(())
    })
    .await?;
    emit_stage(Stage::InterviewsDone);
    pause(token, config.delays.after_interviews).await?;

    // Stage 3: market analysis
    let snapshot = market::analyze();
    commit(shared, token, |s| {
        s.state.advance_to(Stage::MarketAnalyzed)?;
        s.market = Some(snapshot.clone());
        Ok(())
    })
    .await?;
    emit_stage(Stage::MarketAnalyzed);
    pause(token, config.delays.after_market).await?;

    // Stage 4: financial projection
    let projection = financial::project(&config.assumptions);
    commit(shared, token, |s| {
        s.state.advance_to(Stage::FinancialsProjected)?;
        s.financials = Some(projection.clone());
        Ok(())
    })
    .await?;
    emit_stage(Stage::FinancialsProjected);
    pause(token, config.delays.after_financials).await?;

    // Stage 5: result analysis
    let evaluator = match &config.rules {
        Some(rules) => Evaluator::new(rules.clone()),
        None => Evaluator::reference(&hypotheses),
    };
    let results = evaluator.evaluate(&hypotheses);
    let report = RunReport::new(
        personas,
        Some(snapshot),
        Some(projection),
        results.clone(),
    );
    commit(shared, token, |s| {
        s.state.advance_to(Stage::ResultsReady)?;
        s.results = results;
        s.report = Some(report);
        Ok(())
    })
    .await?;
    emit_stage(Stage::ResultsReady);
    let _ = events.send(SimulationEvent::RunCompleted { run_id });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use venture_core::InMemoryHypothesisStorage;

    fn engine_without_delays() -> SimulationEngine {
        let storage = Arc::new(InMemoryHypothesisStorage::with_defaults());
        SimulationEngine::with_config(
            storage,
            EngineConfig {
                delays: StageDelays::none(),
                ..EngineConfig::default()
            },
        )
    }

    async fn wait_until_idle(engine: &SimulationEngine) {
        for _ in 0..200 {
            if !engine.snapshot().await.running {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("run did not finish");
    }

    #[tokio::test]
    async fn test_run_reaches_terminal_state() {
        let engine = engine_without_delays();
        engine.start().await.unwrap();
        wait_until_idle(&engine).await;

        let snapshot = engine.snapshot().await;
        assert_eq!(snapshot.stage, Stage::ResultsReady);
        assert_eq!(snapshot.progress, 100);
        assert_eq!(snapshot.personas.len(), 3);
        assert!(snapshot.market.is_some());
        assert!(snapshot.financials.is_some());
        assert_eq!(snapshot.results.len(), 4);
        assert!(snapshot.report.is_some());
    }

    #[tokio::test]
    async fn test_start_twice_rejected() {
        let storage = Arc::new(InMemoryHypothesisStorage::with_defaults());
        let engine = SimulationEngine::new(storage);

        engine.start().await.unwrap();
        let second = engine.start().await;
        assert!(matches!(second, Err(EngineError::AlreadyRunning)));

        engine.restart().await;
    }

    #[tokio::test]
    async fn test_restart_is_idempotent() {
        let engine = engine_without_delays();
        engine.restart().await;
        engine.restart().await;

        let snapshot = engine.snapshot().await;
        assert_eq!(snapshot.stage, Stage::Idle);
        assert_eq!(snapshot.progress, 0);
        assert!(!snapshot.running);
    }

    #[tokio::test]
    async fn test_snapshot_before_any_run() {
        let engine = engine_without_delays();
        let snapshot = engine.snapshot().await;
        assert!(snapshot.run_id.is_none());
        assert!(snapshot.personas.is_empty());
        assert!(snapshot.results.is_empty());
    }
}
