//! Run report assembly
//!
//! Bundles the collections a completed run produced with a headline
//! summary, ready for read access or JSON export.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::evaluation::{SimulationResult, Verdict};
use crate::financial::FinancialProjection;
use crate::market::MarketSnapshot;
use crate::persona::Persona;

/// Headline numbers for a completed run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    pub total_personas: usize,
    pub total_interviews: usize,
    pub validated_hypotheses: usize,
    pub invalidated_hypotheses: usize,
    pub partial_hypotheses: usize,
    pub break_even_month: Option<u32>,
    pub projected_roi_percent: Option<f64>,
}

impl RunSummary {
    pub fn compute(
        personas: &[Persona],
        results: &[SimulationResult],
        financials: Option<&FinancialProjection>,
    ) -> Self {
        let count = |verdict: Verdict| results.iter().filter(|r| r.verdict == verdict).count();
        Self {
            total_personas: personas.len(),
            total_interviews: personas.iter().map(|p| p.responses.len()).sum(),
            validated_hypotheses: count(Verdict::Validated),
            invalidated_hypotheses: count(Verdict::Invalidated),
            partial_hypotheses: count(Verdict::Partial),
            break_even_month: financials.and_then(|f| f.metrics.break_even_month),
            projected_roi_percent: financials.map(|f| f.metrics.roi_percent),
        }
    }
}

/// Everything a completed run produced
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub personas: Vec<Persona>,
    pub market: Option<MarketSnapshot>,
    pub financials: Option<FinancialProjection>,
    pub results: Vec<SimulationResult>,
    pub summary: RunSummary,
}

impl RunReport {
    pub fn new(
        personas: Vec<Persona>,
        market: Option<MarketSnapshot>,
        financials: Option<FinancialProjection>,
        results: Vec<SimulationResult>,
    ) -> Self {
        let summary = RunSummary::compute(&personas, &results, financials.as_ref());
        Self {
            generated_at: Utc::now(),
            personas,
            market,
            financials,
            results,
            summary,
        }
    }
}
