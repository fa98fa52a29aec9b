//! Storage abstraction for hypotheses
//!
//! Trait-based storage with an in-memory implementation. Insertion order is
//! part of the contract: `list_hypotheses` returns hypotheses in the order
//! they were added, which is the order the evaluator reports results in.

use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::{Result, SimulationError};
use crate::hypothesis::types::{Hypothesis, HypothesisId};

/// Storage trait for hypotheses (allows test mocks and editor-backed sources)
#[async_trait]
pub trait HypothesisStorage: Send + Sync {
    /// Add a hypothesis, appending to the ordered set
    async fn add_hypothesis(&self, hypothesis: &Hypothesis) -> Result<HypothesisId>;

    /// Get a hypothesis by ID
    async fn get_hypothesis(&self, id: HypothesisId) -> Result<Option<Hypothesis>>;

    /// List all hypotheses in insertion order
    async fn list_hypotheses(&self) -> Result<Vec<Hypothesis>>;

    /// Delete a hypothesis
    async fn delete_hypothesis(&self, id: HypothesisId) -> Result<bool>;
}

/// In-memory ordered storage
pub struct InMemoryHypothesisStorage {
    hypotheses: Arc<RwLock<IndexMap<HypothesisId, Hypothesis>>>,
}

impl InMemoryHypothesisStorage {
    pub fn new() -> Self {
        Self {
            hypotheses: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// Storage pre-seeded with the built-in default set
    pub fn with_defaults() -> Self {
        let mut map = IndexMap::new();
        for h in Hypothesis::default_set() {
            map.insert(h.id(), h);
        }
        Self {
            hypotheses: Arc::new(RwLock::new(map)),
        }
    }
}

impl Default for InMemoryHypothesisStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HypothesisStorage for InMemoryHypothesisStorage {
    async fn add_hypothesis(&self, hypothesis: &Hypothesis) -> Result<HypothesisId> {
        let mut store = self.hypotheses.write().await;
        let id = hypothesis.id();
        store.insert(id, hypothesis.clone());
        Ok(id)
    }

    async fn get_hypothesis(&self, id: HypothesisId) -> Result<Option<Hypothesis>> {
        let store = self.hypotheses.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn list_hypotheses(&self) -> Result<Vec<Hypothesis>> {
        let store = self.hypotheses.read().await;
        Ok(store.values().cloned().collect())
    }

    async fn delete_hypothesis(&self, id: HypothesisId) -> Result<bool> {
        let mut store = self.hypotheses.write().await;
        Ok(store.shift_remove(&id).is_some())
    }
}

/// Fetch a hypothesis or fail with `NotFound`
pub async fn require_hypothesis(
    storage: &dyn HypothesisStorage,
    id: HypothesisId,
) -> Result<Hypothesis> {
    storage
        .get_hypothesis(id)
        .await?
        .ok_or_else(|| SimulationError::NotFound(format!("Hypothesis {} not found", id)))
}
