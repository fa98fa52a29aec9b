//! Hypothesis evaluation
//!
//! Maps each hypothesis to a verdict, a confidence percent, and feedback /
//! recommendation lists. Dispatch is rule-table driven (see [`rules`]);
//! randomness is confined to the `RandomPartial` fallback and can be seeded
//! by callers through [`Evaluator::evaluate_with_rng`].

pub mod confidence;
pub mod rules;

pub use confidence::{Confidence, ConfidenceError};
pub use rules::{EvaluationRule, RuleTable};

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::hypothesis::{Hypothesis, HypothesisId};

/// Categorical judgment on a hypothesis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Validated,
    Invalidated,
    Partial,
}

impl Verdict {
    /// Korean display label
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Validated => "검증됨",
            Verdict::Invalidated => "무효화됨",
            Verdict::Partial => "부분 검증",
        }
    }
}

/// The evaluation outcome for one hypothesis
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationResult {
    pub hypothesis: HypothesisId,
    pub statement: String,
    pub verdict: Verdict,
    pub confidence: Confidence,
    pub feedback: Vec<String>,
    pub recommendations: Vec<String>,
    pub evaluated_at: DateTime<Utc>,
}

/// Rule-table driven evaluator
#[derive(Clone, Debug, Default)]
pub struct Evaluator {
    rules: RuleTable,
}

impl Evaluator {
    pub fn new(rules: RuleTable) -> Self {
        Self { rules }
    }

    /// Evaluator carrying the reference rules bound to the given hypotheses
    pub fn reference(hypotheses: &[Hypothesis]) -> Self {
        Self::new(RuleTable::reference(hypotheses))
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Evaluate every hypothesis, one result per input, input order kept.
    ///
    /// An empty input yields an empty result set.
    pub fn evaluate(&self, hypotheses: &[Hypothesis]) -> Vec<SimulationResult> {
        self.evaluate_with_rng(hypotheses, &mut rand::thread_rng())
    }

    /// As [`evaluate`](Self::evaluate), with a caller-supplied RNG for the
    /// `RandomPartial` confidence draw.
    pub fn evaluate_with_rng<R: Rng>(
        &self,
        hypotheses: &[Hypothesis],
        rng: &mut R,
    ) -> Vec<SimulationResult> {
        hypotheses
            .iter()
            .map(|h| self.evaluate_one(h, rng))
            .collect()
    }

    fn evaluate_one<R: Rng>(&self, hypothesis: &Hypothesis, rng: &mut R) -> SimulationResult {
        let (verdict, confidence, feedback, recommendations) =
            match self.rules.get(hypothesis.id()) {
                Some(EvaluationRule::Fixed {
                    verdict,
                    confidence,
                    feedback,
                    recommendations,
                }) => (
                    *verdict,
                    *confidence,
                    feedback.clone(),
                    recommendations.clone(),
                ),
                Some(EvaluationRule::RandomPartial) | None => (
                    Verdict::Partial,
                    Confidence::saturating(rng.gen_range(50..90)),
                    rules::GENERIC_FEEDBACK
                        .iter()
                        .map(|s| s.to_string())
                        .collect(),
                    rules::GENERIC_RECOMMENDATIONS
                        .iter()
                        .map(|s| s.to_string())
                        .collect(),
                ),
            };

        tracing::debug!(
            hypothesis = %hypothesis.id(),
            ?verdict,
            %confidence,
            "hypothesis evaluated"
        );

        SimulationResult {
            hypothesis: hypothesis.id(),
            statement: hypothesis.statement().to_string(),
            verdict,
            confidence,
            feedback,
            recommendations,
            evaluated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_one_result_per_hypothesis_in_order() {
        let hypotheses = Hypothesis::default_set();
        let results = Evaluator::reference(&hypotheses).evaluate(&hypotheses);

        assert_eq!(results.len(), hypotheses.len());
        for (r, h) in results.iter().zip(&hypotheses) {
            assert_eq!(r.hypothesis, h.id());
            assert_eq!(r.statement, h.statement());
        }
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let evaluator = Evaluator::new(RuleTable::new());
        assert!(evaluator.evaluate(&[]).is_empty());
    }

    #[test]
    fn test_reference_scenario() {
        let hypotheses = Hypothesis::default_set();
        let results = Evaluator::reference(&hypotheses).evaluate(&hypotheses);

        assert_eq!(results[0].verdict, Verdict::Partial);
        assert_eq!(results[0].confidence.percent(), 45);
        assert_eq!(results[1].verdict, Verdict::Invalidated);
        assert_eq!(results[1].confidence.percent(), 25);
        assert_eq!(results[2].verdict, Verdict::Validated);
        assert_eq!(results[2].confidence.percent(), 75);
        assert_eq!(results[3].verdict, Verdict::Partial);
        assert!((50..90).contains(&results[3].confidence.percent()));
    }

    #[test]
    fn test_unkeyed_hypotheses_get_generic_partial() {
        let hypotheses = Hypothesis::default_set();
        let evaluator = Evaluator::new(RuleTable::new());
        let results = evaluator.evaluate(&hypotheses);

        for r in &results {
            assert_eq!(r.verdict, Verdict::Partial);
            assert!((50..90).contains(&r.confidence.percent()));
            assert_eq!(r.feedback.len(), 3);
            assert_eq!(r.recommendations.len(), 3);
        }
    }

    #[test]
    fn test_confidence_always_in_bounds() {
        let hypotheses: Vec<Hypothesis> = (0..20)
            .map(|i| Hypothesis::new(format!("가설 {}", i), ["channels"]).unwrap())
            .collect();
        let results = Evaluator::reference(&hypotheses).evaluate(&hypotheses);
        for r in &results {
            assert!(r.confidence.percent() <= 100);
        }
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let hypotheses = Hypothesis::default_set();
        let evaluator = Evaluator::new(RuleTable::new());

        let a = evaluator.evaluate_with_rng(&hypotheses, &mut StdRng::seed_from_u64(7));
        let b = evaluator.evaluate_with_rng(&hypotheses, &mut StdRng::seed_from_u64(7));
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.confidence, y.confidence);
        }
    }

    #[test]
    fn test_verdict_follows_hypothesis_after_reorder() {
        let hypotheses = Hypothesis::default_set();
        let evaluator = Evaluator::reference(&hypotheses);

        let mut reordered = hypotheses.clone();
        reordered.swap(1, 2);
        let results = evaluator.evaluate(&reordered);

        // The invalidated-pricing hypothesis keeps its verdict at its new position
        assert_eq!(results[2].hypothesis, hypotheses[1].id());
        assert_eq!(results[2].verdict, Verdict::Invalidated);
        assert_eq!(results[1].verdict, Verdict::Validated);
    }

    #[test]
    fn test_verdict_labels() {
        assert_eq!(Verdict::Validated.label(), "검증됨");
        assert_eq!(Verdict::Partial.label(), "부분 검증");
    }
}
