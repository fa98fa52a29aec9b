//! Customer personas
//!
//! Synthetic representative customers used in place of real interviews.
//! `generate` produces the reference cohort: exactly three fully populated
//! personas, one per adoption segment, with empty response lists. The cohort
//! is deterministic apart from the freshly minted ids.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::interview::InterviewResponse;

/// Unique identifier for a persona
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonaId(pub Uuid);

impl PersonaId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PersonaId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PersonaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Adoption segment a persona belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Segment {
    EarlyAdopter,
    Pragmatist,
    Conservative,
}

impl Segment {
    /// Korean display label, as shown on persona cards
    pub fn label(&self) -> &'static str {
        match self {
            Segment::EarlyAdopter => "얼리어답터",
            Segment::Pragmatist => "실용주의자",
            Segment::Conservative => "보수주의자",
        }
    }
}

/// A synthetic customer profile
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Persona {
    pub id: PersonaId,
    pub name: String,
    pub age: u32,
    pub occupation: String,
    pub income_band: String,
    pub pain_points: Vec<String>,
    pub needs: Vec<String>,
    pub segment: Segment,
    pub responses: Vec<InterviewResponse>,
    pub created_at: DateTime<Utc>,
}

impl Persona {
    fn cohort_entry(
        name: &str,
        age: u32,
        occupation: &str,
        income_band: &str,
        pain_points: &[&str],
        needs: &[&str],
        segment: Segment,
    ) -> Self {
        Self {
            id: PersonaId::new(),
            name: name.to_string(),
            age,
            occupation: occupation.to_string(),
            income_band: income_band.to_string(),
            pain_points: pain_points.iter().map(|s| s.to_string()).collect(),
            needs: needs.iter().map(|s| s.to_string()).collect(),
            segment,
            responses: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// First stated need, used by the general interview answer
    pub fn primary_need(&self) -> Option<&str> {
        self.needs.first().map(String::as_str)
    }
}

/// Generate the reference cohort of three personas, one per segment.
///
/// Every cohort slot is fully populated; response lists start empty and are
/// filled by the interview stage. Ids are fresh per call so a re-run never
/// shares personas with an earlier run.
pub fn generate() -> Vec<Persona> {
    vec![
        Persona::cohort_entry(
            "김민지",
            25,
            "스타트업 마케터",
            "3000-4000만원",
            &["업무 효율성 부족", "협업 도구 산재"],
            &["통합 관리 솔루션", "합리적 가격"],
            Segment::EarlyAdopter,
        ),
        Persona::cohort_entry(
            "이준호",
            32,
            "프리랜서 개발자",
            "5000-7000만원",
            &["프로젝트 관리 어려움", "클라이언트 소통"],
            &["프로젝트 트래킹", "실시간 협업"],
            Segment::Pragmatist,
        ),
        Persona::cohort_entry(
            "박서연",
            28,
            "중소기업 팀장",
            "4000-5000만원",
            &["팀 관리 복잡성", "보고서 작성 시간"],
            &["자동화 기능", "팀 협업 도구"],
            Segment::Conservative,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cohort_size_and_completeness() {
        let cohort = generate();
        assert_eq!(cohort.len(), 3);
        for p in &cohort {
            assert!(!p.name.is_empty());
            assert!(!p.occupation.is_empty());
            assert!(!p.income_band.is_empty());
            assert!(!p.pain_points.is_empty());
            assert!(!p.needs.is_empty());
            assert!(p.responses.is_empty());
        }
    }

    #[test]
    fn test_cohort_covers_all_segments() {
        let cohort = generate();
        let segments: Vec<Segment> = cohort.iter().map(|p| p.segment).collect();
        assert!(segments.contains(&Segment::EarlyAdopter));
        assert!(segments.contains(&Segment::Pragmatist));
        assert!(segments.contains(&Segment::Conservative));
    }

    #[test]
    fn test_cohort_deterministic_fields() {
        let a = generate();
        let b = generate();
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.name, y.name);
            assert_eq!(x.age, y.age);
            assert_eq!(x.segment, y.segment);
        }
    }

    #[test]
    fn test_cohort_fresh_ids_per_run() {
        let a = generate();
        let b = generate();
        assert_ne!(a[0].id, b[0].id);
    }

    #[test]
    fn test_primary_need() {
        let cohort = generate();
        assert_eq!(cohort[0].primary_need(), Some("통합 관리 솔루션"));
    }

    #[test]
    fn test_segment_labels() {
        assert_eq!(Segment::EarlyAdopter.label(), "얼리어답터");
        assert_eq!(Segment::Conservative.label(), "보수주의자");
    }
}
