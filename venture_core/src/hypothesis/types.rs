//! Core hypothesis types
//!
//! Defines the hypothesis data model:
//! - HypothesisId: Unique identifier (UUID v4)
//! - HypothesisOrigin: Whether a hypothesis is user-authored or built-in
//! - Hypothesis: A falsifiable statement with related-block tags

use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{Result, SimulationError};

/// Unique identifier for a hypothesis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HypothesisId(pub Uuid);

impl HypothesisId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for HypothesisId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for HypothesisId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a hypothesis came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HypothesisOrigin {
    /// Seeded by the built-in default set
    Default,
    /// Authored through the canvas editor
    User,
}

/// A falsifiable statement about customers, pricing or channels,
/// tagged with the canvas blocks it relates to.
///
/// Hypotheses are read-only during a simulation run; a run never
/// mutates them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Hypothesis {
    pub id: HypothesisId,
    pub statement: String,
    pub tags: IndexSet<String>,
    pub origin: HypothesisOrigin,
    pub created_at: DateTime<Utc>,
}

impl Hypothesis {
    /// Create a user-authored hypothesis.
    ///
    /// # Errors
    /// - `InvalidHypothesis` if the statement is empty or whitespace-only
    /// - `InvalidHypothesis` if no related-block tags are given
    pub fn new<S, I, T>(statement: S, tags: I) -> Result<Self>
    where
        S: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let statement = statement.into();
        if statement.trim().is_empty() {
            return Err(SimulationError::InvalidHypothesis(
                "statement must not be empty".to_string(),
            ));
        }
        let tags: IndexSet<String> = tags.into_iter().map(Into::into).collect();
        if tags.is_empty() {
            return Err(SimulationError::InvalidHypothesis(
                "user-created hypotheses need at least one related-block tag".to_string(),
            ));
        }
        Ok(Self {
            id: HypothesisId::new(),
            statement,
            tags,
            origin: HypothesisOrigin::User,
            created_at: Utc::now(),
        })
    }

    /// Create a built-in default hypothesis. Defaults carry no tags.
    fn default_entry(statement: &str) -> Self {
        Self {
            id: HypothesisId::new(),
            statement: statement.to_string(),
            tags: IndexSet::new(),
            origin: HypothesisOrigin::Default,
            created_at: Utc::now(),
        }
    }

    /// The built-in default set, in canvas order.
    pub fn default_set() -> Vec<Self> {
        [
            "20대 고객의 70%가 우리 앱을 유료로 사용할 것이다",
            "월 구독료 9,900원은 적정 가격이다",
            "소셜 미디어를 통한 마케팅이 가장 효과적일 것이다",
            "3개월 내에 1,000명의 유료 사용자를 확보할 수 있다",
        ]
        .iter()
        .map(|s| Self::default_entry(s))
        .collect()
    }

    pub fn id(&self) -> HypothesisId {
        self.id
    }

    pub fn statement(&self) -> &str {
        &self.statement
    }

    pub fn tags(&self) -> &IndexSet<String> {
        &self.tags
    }

    pub fn origin(&self) -> HypothesisOrigin {
        self.origin
    }
}
