//! Market analysis
//!
//! A fixed-value market snapshot for the simulated segment. A future
//! implementation would parameterize this on canvas contents; for now the
//! analyzer is a static provider, one snapshot per run.

use serde::{Deserialize, Serialize};

/// Competitive intensity of the target market
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompetitionLevel {
    Low,
    Medium,
    High,
}

/// Market sizing for one simulation run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Total addressable market, KRW
    pub market_size: i64,
    /// Expected annual growth, percent
    pub growth_rate: f64,
    pub competition: CompetitionLevel,
    pub entry_barriers: Vec<String>,
}

/// Produce the market snapshot for the simulated segment.
pub fn analyze() -> MarketSnapshot {
    MarketSnapshot {
        market_size: 850_000_000_000,
        growth_rate: 15.2,
        competition: CompetitionLevel::Medium,
        entry_barriers: vec![
            "기존 경쟁자의 브랜드 인지도".to_string(),
            "고객 전환 비용".to_string(),
            "네트워크 효과".to_string(),
        ],
    }
}
