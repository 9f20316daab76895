//! Challenge-question generation for the surprise-question event.
//!
//! A rule bank per mode fires on script keywords; when a text generator is
//! available it is asked first, with the rule bank as the fallback so a
//! question is always produced.

use super::textgen::TextGenerator;
use crate::mode::PresentationMode;
use std::sync::Arc;
use tracing::warn;

struct QuestionRule {
    triggers: &'static [&'static str],
    questions: &'static [&'static str],
}

const PERSUASIVE_RULES: &[QuestionRule] = &[
    QuestionRule {
        triggers: &["노력합시다", "관심 바랍니다", "기대합니다", "좋겠습니다"],
        questions: &[
            "좋은 제안입니다. 그렇다면 당장 내일부터 실행해야 할 구체적인 첫 번째 행동은 무엇입니까?",
            "청중이 발표장을 나서자마자 바로 실천할 수 있는 가장 작은 행동 하나를 제안한다면 무엇인가요?",
        ],
    },
    QuestionRule {
        triggers: &["장기적으로", "언젠가", "앞으로", "차차"],
        questions: &[
            "왜 하필 지금 이 행동을 해야 합니까? 다음 달로 미뤘을 때 발생하는 가장 큰 손실은 무엇인가요?",
            "이 제안을 지금 당장 실행하지 않았을 때 감수해야 할 최악의 시나리오는 무엇입니까?",
        ],
    },
    QuestionRule {
        triggers: &["최고의", "완벽한", "문제없는", "확실한 성공"],
        questions: &[
            "기대 효과는 인상적입니다. 실현을 위해 넘어야 할 가장 큰 현실적인 장애물은 무엇입니까?",
            "이 제안에 반대하는 사람들이 가장 우려할 만한 점은 무엇이라고 생각하십니까?",
        ],
    },
];

const EMPATHETIC_RULES: &[QuestionRule] = &[
    QuestionRule {
        triggers: &["저는 성공했고", "제가 해냈습니다", "1등", "최고의 성과"],
        questions: &[
            "놀라운 성과네요. 그 성공 경험이 평범한 청중들의 삶에는 어떻게 적용될 수 있을까요?",
            "발표자님과 다른 상황에 처한 청중들도 공감할 수 있는 연결 고리는 무엇입니까?",
        ],
    },
    QuestionRule {
        triggers: &["항상", "반드시", "완벽하게", "쉬웠습니다"],
        questions: &[
            "혹시 그 과정에서 포기하고 싶었거나 가장 부끄러웠던 실패의 순간은 언제였나요?",
            "가장 힘들었던 순간에 자신을 지탱해준 단 하나의 생각은 무엇이었습니까?",
        ],
    },
    QuestionRule {
        triggers: &["힘냅시다", "응원합니다", "다 잘될 겁니다"],
        questions: &[
            "지금 비슷한 시기를 겪는 사람에게 해주고 싶은 가장 현실적인 조언 한 가지는 무엇인가요?",
            "당시의 발표자님에게 가장 필요했던 구체적인 도움은 무엇이었나요?",
        ],
    },
];

// Informational questions probe the IMRAD section whose markers are missing
const IMRAD_QUESTIONS: &[(&[&str], &str)] = &[
    (
        &["기존", "선행", "차별", "다르", "독창", "새로"],
        "기존 선행 연구들과 비교했을 때, 이 발표만이 가지는 가장 결정적인 차별점은 무엇입니까?",
    ),
    (
        &["때문에", "이유", "선정", "고려하여", "채택"],
        "선택하신 방법론의 구체적인 선정 이유는 무엇이며, 다른 대안은 고려하지 않으셨나요?",
    ),
    (
        &["한계", "아쉬", "부족", "후속", "향후", "제언"],
        "진행하면서 가장 아쉬웠던 한계점이나, 후속 작업에서 보완하고 싶은 점은 무엇입니까?",
    ),
];

const DEFAULT_QUESTIONS: &[(PresentationMode, &str)] = &[
    (
        PresentationMode::Informational,
        "진행하면서 가장 아쉬웠던 한계점이나, 후속 작업에서 보완하고 싶은 점은 무엇입니까?",
    ),
    (
        PresentationMode::Persuasive,
        "이 제안을 한 문장으로 요약했을 때, 청중이 꼭 기억해야 할 핵심 메시지는 무엇입니까?",
    ),
    (
        PresentationMode::Empathetic,
        "이 이야기를 통해 청중들이 어떤 감정을 느끼고 돌아가기를 가장 원하십니까?",
    ),
];

/// Generates a challenge question for the active script and mode.
pub struct ChallengeQuestionGenerator {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl ChallengeQuestionGenerator {
    pub fn new() -> Self {
        Self { generator: None }
    }

    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Always returns a question: generator first, then the rule bank, then
    /// the per-mode default.
    pub async fn generate(&self, script: &str, mode: PresentationMode) -> String {
        if let Some(generator) = &self.generator {
            match generator.generate(&question_prompt(script, mode)).await {
                Ok(question) if !question.trim().is_empty() => {
                    return question.trim().replace('\n', " ");
                }
                Ok(_) => {}
                Err(e) => warn!("Question generation failed, using rule bank: {}", e),
            }
        }

        rule_based_question(script, mode)
    }
}

impl Default for ChallengeQuestionGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn rule_based_question(script: &str, mode: PresentationMode) -> String {
    let candidates: Vec<&str> = match mode {
        PresentationMode::Informational => IMRAD_QUESTIONS
            .iter()
            .filter(|(triggers, _)| !triggers.iter().any(|t| script.contains(t)))
            .map(|(_, q)| *q)
            .collect(),
        PresentationMode::Persuasive => matching_questions(PERSUASIVE_RULES, script),
        PresentationMode::Empathetic => matching_questions(EMPATHETIC_RULES, script),
    };

    if candidates.is_empty() {
        return DEFAULT_QUESTIONS
            .iter()
            .find(|(m, _)| *m == mode)
            .map(|(_, q)| q.to_string())
            .unwrap_or_default();
    }

    // Deterministic pick keyed on the script so repeats vary across scripts
    candidates[script.len() % candidates.len()].to_string()
}

fn matching_questions<'a>(rules: &'a [QuestionRule], script: &str) -> Vec<&'a str> {
    rules
        .iter()
        .filter(|rule| rule.triggers.iter().any(|t| script.contains(t)))
        .flat_map(|rule| rule.questions.iter().copied())
        .collect()
}

fn question_prompt(script: &str, mode: PresentationMode) -> String {
    let persona = match mode {
        PresentationMode::Informational => {
            "당신은 발표자의 논리적 허점을 찾아내는 날카로운 학술 리뷰어입니다. IMRAD 구조에 입각하여 가장 의심스러운 부분에 대해 반박 질문을 하나만 생성하세요."
        }
        PresentationMode::Persuasive => {
            "당신은 발표자의 주장을 쉽게 믿지 않는 회의적인 투자자입니다. 근거가 빈약하거나 시급성이 부족한 부분을 공격하는 질문을 하나만 생성하세요."
        }
        PresentationMode::Empathetic => {
            "당신은 발표자의 이야기에 공감하고 싶지만 과장은 경계하는 청중입니다. 진정성을 확인하는 질문을 하나만 생성하세요."
        }
    };

    format!(
        "{persona}\n질문은 한 문장으로, 정중하지만 핵심을 꿰뚫어야 합니다. 절대로 두 문장 이상으로 답하지 마세요.\n\n[대본]\n{script}\n\n[질문]"
    )
}
