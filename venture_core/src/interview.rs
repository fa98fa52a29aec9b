//! Virtual customer interviews
//!
//! A fixed five-question script is put to every persona in the cohort.
//! Answers and sentiment are derived from the persona's segment and age,
//! never from the hypothesis text. Each question is linked to a hypothesis
//! by an explicit id reference resolved once when the script is built, so
//! reordering hypotheses afterwards cannot re-target recorded responses.

use serde::{Deserialize, Serialize};

use crate::hypothesis::{Hypothesis, HypothesisId};
use crate::persona::{Persona, Segment};

/// Sentiment of an interview answer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

/// What an interview question probes, driving answer derivation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// Willingness to pay the subscription price
    Pricing,
    /// Discovery / marketing channel
    Channel,
    /// Everything else; answered from the persona's primary need
    General,
}

/// One question of the interview script
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub text: String,
    pub kind: QuestionKind,
    pub related_hypothesis: Option<HypothesisId>,
}

/// One persona's answer to one question
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InterviewResponse {
    pub question: String,
    pub answer: String,
    pub sentiment: Sentiment,
    pub related_hypothesis: Option<HypothesisId>,
}

/// The fixed interview script
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InterviewScript {
    questions: Vec<InterviewQuestion>,
}

const QUESTION_TEXTS: [(&str, QuestionKind); 5] = [
    ("현재 어떤 도구를 사용하고 계신가요?", QuestionKind::General),
    (
        "월 9,900원의 구독료를 지불할 의향이 있으신가요?",
        QuestionKind::Pricing,
    ),
    (
        "어떤 기능이 가장 중요하다고 생각하시나요?",
        QuestionKind::General,
    ),
    (
        "경쟁 제품과 비교했을 때 우리 제품의 장점은 무엇일까요?",
        QuestionKind::General,
    ),
    (
        "어떤 채널을 통해 제품을 알게 되셨나요?",
        QuestionKind::Channel,
    ),
];

impl InterviewScript {
    /// Build the standard script against a hypothesis list.
    ///
    /// Question-to-hypothesis links cycle through the list in order; with an
    /// empty list every link is `None`.
    pub fn standard(hypotheses: &[Hypothesis]) -> Self {
        let questions = QUESTION_TEXTS
            .iter()
            .enumerate()
            .map(|(i, (text, kind))| InterviewQuestion {
                text: text.to_string(),
                kind: *kind,
                related_hypothesis: if hypotheses.is_empty() {
                    None
                } else {
                    Some(hypotheses[i % hypotheses.len()].id())
                },
            })
            .collect();
        Self { questions }
    }

    pub fn questions(&self) -> &[InterviewQuestion] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Derive (answer, sentiment) for one persona and one question
fn derive_answer(persona: &Persona, question: &InterviewQuestion) -> (String, Sentiment) {
    match question.kind {
        QuestionKind::Pricing => match persona.segment {
            Segment::EarlyAdopter => (
                "혁신적인 기능이 있다면 기꺼이 지불하겠습니다.".to_string(),
                Sentiment::Positive,
            ),
            Segment::Pragmatist => (
                "가격 대비 가치가 명확하다면 고려해볼 수 있습니다.".to_string(),
                Sentiment::Neutral,
            ),
            Segment::Conservative => (
                "무료 체험 기간이 충분하다면 생각해보겠습니다.".to_string(),
                Sentiment::Negative,
            ),
        },
        QuestionKind::Channel => {
            if persona.age < 30 {
                (
                    "인스타그램 광고를 통해 알게 되었습니다.".to_string(),
                    Sentiment::Positive,
                )
            } else {
                (
                    "동료의 추천으로 알게 되었습니다.".to_string(),
                    Sentiment::Positive,
                )
            }
        }
        QuestionKind::General => {
            let need = persona.primary_need().unwrap_or("더 나은 도구");
            (
                format!("{}에 대한 해결책을 찾고 있습니다.", need),
                Sentiment::Neutral,
            )
        }
    }
}

/// Run the script against every persona, replacing its response list.
///
/// Produces exactly one response per (persona, question) pair, in script
/// order. No other persona field is touched.
pub fn conduct(personas: &mut [Persona], script: &InterviewScript) {
    for persona in personas.iter_mut() {
        let responses = script
            .questions()
            .iter()
            .map(|question| {
                let (answer, sentiment) = derive_answer(persona, question);
                InterviewResponse {
                    question: question.text.clone(),
                    answer,
                    sentiment,
                    related_hypothesis: question.related_hypothesis,
                }
            })
            .collect();
        persona.responses = responses;
    }
}
