//! Evaluation rule table
//!
//! Verdicts are selected by an explicit rule table keyed on hypothesis id,
//! not on list position. A hypothesis with no rule falls back to
//! `RandomPartial`: a partial verdict with generic feedback and a
//! confidence drawn uniformly from [50, 90).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::evaluation::confidence::Confidence;
use crate::evaluation::Verdict;
use crate::hypothesis::{Hypothesis, HypothesisId};

/// How a single hypothesis is judged
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum EvaluationRule {
    /// A predetermined verdict with fixed confidence and advice
    Fixed {
        verdict: Verdict,
        confidence: Confidence,
        feedback: Vec<String>,
        recommendations: Vec<String>,
    },
    /// Generic partial verdict with randomized confidence
    RandomPartial,
}

/// Generic feedback used by the `RandomPartial` fallback
pub(crate) const GENERIC_FEEDBACK: [&str; 3] = [
    "시장 진입 초기 성장 속도 예측 어려움",
    "경쟁 환경이 빠르게 변화 중",
    "제품-시장 적합성 추가 검증 필요",
];

/// Generic recommendations used by the `RandomPartial` fallback
pub(crate) const GENERIC_RECOMMENDATIONS: [&str; 3] = [
    "MVP 출시 후 빠른 피드백 수집",
    "주간 단위 지표 모니터링 체계 구축",
    "피벗 시나리오 3개 준비",
];

fn strings(items: [&str; 3]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Rule table mapping hypothesis ids to evaluation rules, in insertion order
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RuleTable {
    rules: IndexMap<HypothesisId, EvaluationRule>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: HypothesisId, rule: EvaluationRule) {
        self.rules.insert(id, rule);
    }

    pub fn get(&self, id: HypothesisId) -> Option<&EvaluationRule> {
        self.rules.get(&id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The reference rule set, bound to a hypothesis list in order.
    ///
    /// The first three hypotheses receive the fixed reference rules
    /// (partial 45, invalidated 25, validated 75); every later hypothesis
    /// is left to the `RandomPartial` fallback.
    pub fn reference(hypotheses: &[Hypothesis]) -> Self {
        let mut table = Self::new();
        let fixed = Self::reference_rules();
        for (hypothesis, rule) in hypotheses.iter().zip(fixed) {
            table.insert(hypothesis.id(), rule);
        }
        table
    }

    fn reference_rules() -> [EvaluationRule; 3] {
        [
            EvaluationRule::Fixed {
                verdict: Verdict::Partial,
                confidence: Confidence::saturating(45),
                feedback: strings([
                    "20대 중 얼리어답터 그룹(30%)은 긍정적 반응",
                    "나머지 70%는 무료 버전 선호",
                    "가격 민감도가 예상보다 높음",
                ]),
                recommendations: strings([
                    "프리미엄 모델 대신 프리미엄 기능 세분화",
                    "학생 할인 정책 도입 고려",
                    "무료 체험 기간 연장 (14일 → 30일)",
                ]),
            },
            EvaluationRule::Fixed {
                verdict: Verdict::Invalidated,
                confidence: Confidence::saturating(25),
                feedback: strings([
                    "목표 고객의 60%가 가격 부담 표현",
                    "경쟁사 대비 20% 높은 가격",
                    "가치 제안이 가격을 정당화하지 못함",
                ]),
                recommendations: strings([
                    "가격을 7,900원으로 조정",
                    "연간 결제 시 할인 제공",
                    "기능별 티어 가격 정책 도입",
                ]),
            },
            EvaluationRule::Fixed {
                verdict: Verdict::Validated,
                confidence: Confidence::saturating(75),
                feedback: strings([
                    "타겟 고객의 65%가 소셜 미디어를 통해 제품 발견",
                    "인스타그램과 유튜브가 가장 효과적",
                    "인플루언서 마케팅 ROI 긍정적",
                ]),
                recommendations: strings([
                    "소셜 미디어 예산 30% 증액",
                    "마이크로 인플루언서 협업 확대",
                    "사용자 생성 콘텐츠 캠페인 기획",
                ]),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_binds_first_three() {
        let hypotheses = Hypothesis::default_set();
        let table = RuleTable::reference(&hypotheses);
        assert_eq!(table.len(), 3);

        assert!(matches!(
            table.get(hypotheses[0].id()),
            Some(EvaluationRule::Fixed {
                verdict: Verdict::Partial,
                ..
            })
        ));
        assert!(matches!(
            table.get(hypotheses[1].id()),
            Some(EvaluationRule::Fixed {
                verdict: Verdict::Invalidated,
                ..
            })
        ));
        assert!(matches!(
            table.get(hypotheses[2].id()),
            Some(EvaluationRule::Fixed {
                verdict: Verdict::Validated,
                ..
            })
        ));
        assert!(table.get(hypotheses[3].id()).is_none());
    }

    #[test]
    fn test_reference_with_short_list() {
        let hypotheses = Hypothesis::default_set();
        let table = RuleTable::reference(&hypotheses[..1]);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_rule_follows_hypothesis_not_position() {
        let hypotheses = Hypothesis::default_set();
        let table = RuleTable::reference(&hypotheses);

        // Reorder the list; rules still resolve by id
        let mut reordered = hypotheses.clone();
        reordered.swap(0, 2);
        assert!(matches!(
            table.get(reordered[2].id()),
            Some(EvaluationRule::Fixed {
                verdict: Verdict::Partial,
                ..
            })
        ));
    }

    #[test]
    fn test_empty_table() {
        let table = RuleTable::new();
        assert!(table.is_empty());
        assert!(table.get(HypothesisId::new()).is_none());
    }
}
