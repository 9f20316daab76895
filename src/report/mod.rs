//! Rule-based coaching feedback assembled from session metrics, with an
//! optional narrative section delegated to an external text generator.

pub mod questions;
pub mod rewrite;
pub mod textgen;

pub use questions::ChallengeQuestionGenerator;
pub use textgen::TextGenerator;

use crate::config::CoachingConfig;
use crate::mode::PresentationMode;
use crate::scoring::ScoreReport;
use crate::session::SessionCounters;
use std::sync::Arc;
use tracing::warn;

/// Transcripts shorter than this (with zero pace) get a data-scarcity report
const MIN_REPORT_CHARS: usize = 10;

/// Formal-ending share above which an informational talk reads as formal
const FORMAL_RATIO_TARGET: f64 = 80.0;

/// Formal-ending share below which an empathetic talk reads as approachable
const CASUAL_RATIO_CEILING: f64 = 50.0;

// Energy bands per mode (score is 0..100 volume-dynamics)
const ENERGY_HIGH: u8 = 70;
const ENERGY_CALM: u8 = 40;
const ENERGY_MID_LOW: u8 = 30;

/// Builds the textual coaching report.
///
/// The rule-based sections (tone, energy, structure) are always produced;
/// the generator, when present and healthy, appends a narrative section.
/// A failing generator degrades to the rule-based text alone, which is
/// guaranteed non-empty.
pub struct CoachingReportBuilder {
    coaching: CoachingConfig,
    generator: Option<Arc<dyn TextGenerator>>,
}

impl CoachingReportBuilder {
    pub fn new(coaching: CoachingConfig) -> Self {
        Self {
            coaching,
            generator: None,
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub async fn build(&self, counters: &SessionCounters, score: &ScoreReport) -> String {
        let transcript = counters.transcript.trim();
        if score.spm == 0 && transcript.chars().count() < MIN_REPORT_CHARS {
            return "🚨 데이터 부족: 음성 데이터가 충분히 인식되지 않았습니다.".to_string();
        }

        let mode = score.mode;
        let mut report = String::from("--- 📈 코칭 리포트 (규칙 기반) ---\n");

        let style_feedback = self.analyze_speech_style(transcript, mode);
        let energy_feedback = analyze_vocal_energy(score.energy, mode);
        report.push_str(&style_feedback);
        report.push_str(&energy_feedback);
        report.push('\n');

        let gaps = if mode == PresentationMode::Informational {
            structure_gaps(&counters.script)
        } else {
            Vec::new()
        };
        if !gaps.is_empty() {
            report.push_str("--- [논리 구조 경고] ---\n");
            for gap in &gaps {
                report.push_str(gap);
                report.push('\n');
            }
            report.push('\n');
        }

        if let Some(generator) = &self.generator {
            report.push_str("--- 🤖 심층 피드백 ---\n");
            let prompt = feedback_prompt(score, &style_feedback, &energy_feedback, &gaps, transcript);
            match generator.generate(&prompt).await {
                Ok(text) if !text.trim().is_empty() => report.push_str(text.trim()),
                Ok(_) => report.push_str("심층 피드백 생성 결과가 비어 있어 건너뜁니다."),
                Err(e) => {
                    warn!("Narrative feedback generation failed: {}", e);
                    report.push_str("심층 피드백 생성에 실패하여 규칙 기반 리포트만 제공합니다.");
                }
            }
            report.push('\n');
        }

        report
    }

    /// Classify tone from the ratio of formal to conversational sentence
    /// endings and judge it against the target mode.
    fn analyze_speech_style(&self, transcript: &str, mode: PresentationMode) -> String {
        let mut formal = 0usize;
        let mut casual = 0usize;

        for token in transcript.split_whitespace() {
            let token = token.trim_matches(|c: char| !c.is_alphanumeric());
            if self
                .coaching
                .formal_endings
                .iter()
                .any(|e| token.ends_with(e.as_str()))
            {
                formal += 1;
            } else if self
                .coaching
                .casual_endings
                .iter()
                .any(|e| token.ends_with(e.as_str()))
            {
                casual += 1;
            }
        }

        let total = formal + casual;
        if total == 0 {
            return "⚠️ [어조 분석] 분석할 종결어미가 부족합니다.\n".to_string();
        }
        let formal_ratio = formal as f64 / total as f64 * 100.0;

        match mode {
            PresentationMode::Informational => {
                if formal_ratio >= FORMAL_RATIO_TARGET {
                    "✅ [어조 분석] 논리적 분위기에 맞게 격식체를 잘 유지하셨습니다.\n".to_string()
                } else {
                    format!(
                        "⚠️ [어조 분석] 더 신뢰감을 주기 위해 격식체 사용을 늘려보세요. (현재 격식체: {}%)\n",
                        formal_ratio as u32
                    )
                }
            }
            PresentationMode::Empathetic => {
                if formal_ratio <= CASUAL_RATIO_CEILING {
                    "✅ [어조 분석] 청중에게 친근하게 다가가는 부드러운 어조가 돋보였습니다.\n"
                        .to_string()
                } else {
                    format!(
                        "⚠️ [어조 분석] 다소 딱딱하게 들릴 수 있습니다. '~해요'체를 섞어보세요. (현재 격식체: {}%)\n",
                        formal_ratio as u32
                    )
                }
            }
            PresentationMode::Persuasive => {
                "✅ [어조 분석] 역동적인 발표에 어울리는 자연스러운 어조입니다.\n".to_string()
            }
        }
    }
}

/// Judge the volume-dynamics score against the band the mode rewards.
fn analyze_vocal_energy(energy: Option<u8>, mode: PresentationMode) -> String {
    let Some(energy) = energy else {
        return "⚠️ [에너지 분석] 오디오 데이터가 부족합니다.\n".to_string();
    };

    match mode {
        PresentationMode::Persuasive => {
            if energy >= ENERGY_HIGH {
                format!(
                    "🔥 [에너지 분석] 에너지가 넘칩니다! (점수: {energy}점) 열정적인 분위기가 잘 전달되었습니다.\n"
                )
            } else {
                format!(
                    "⚠️ [에너지 분석] 에너지가 더 필요합니다. (점수: {energy}점) 강조할 부분에서 목소리를 키워보세요.\n"
                )
            }
        }
        PresentationMode::Informational => {
            if energy <= ENERGY_CALM {
                "✅ [에너지 분석] 차분하고 안정적인 톤으로 신뢰감을 주었습니다.\n".to_string()
            } else {
                format!(
                    "⚠️ [에너지 분석] 다소 흥분한 것처럼 들릴 수 있습니다. (점수: {energy}점) 차분한 톤을 유지해보세요.\n"
                )
            }
        }
        PresentationMode::Empathetic => {
            if (ENERGY_MID_LOW..=ENERGY_HIGH).contains(&energy) {
                "✅ [에너지 분석] 듣기 편안한 안정적인 톤입니다.\n".to_string()
            } else if energy < ENERGY_MID_LOW {
                "⚠️ [에너지 분석] 자칫 지루하게 들릴 수 있습니다. 목소리에 생기를 넣어보세요.\n"
                    .to_string()
            } else {
                "⚠️ [에너지 분석] 다소 과하거나 불안정하게 들릴 수 있습니다.\n".to_string()
            }
        }
    }
}

struct SectionRule {
    triggers: &'static [&'static str],
    warning: &'static str,
}

const INTRO_RULE: SectionRule = SectionRule {
    triggers: &["기존", "선행", "차별", "다르", "독창", "새로", "차별점", "새로운"],
    warning: "[서론 경고] 기존 연구들과 구별되는 이 발표만의 차별점이 명확하지 않습니다.",
};

const METHODS_RULE: SectionRule = SectionRule {
    triggers: &["때문에", "이유", "선정", "고려하여", "채택", "위하여 선정"],
    warning: "[방법 경고] 선택한 방법론에 대한 구체적인 이유나 대안 고려가 부족합니다.",
};

const DISCUSSION_RULE: SectionRule = SectionRule {
    triggers: &["한계", "아쉬", "부족", "후속", "향후", "제언", "아쉬운", "부족한", "향후 과제"],
    warning: "[고찰 경고] 한계점이나 향후 보완 계획에 대한 언급이 누락되었습니다.",
};

const RESULTS_CLAIM_TRIGGERS: &[&str] = &["상관관계", "관련이 있", "나타났습"];
const RESULTS_DEFENSE_TRIGGERS: &[&str] = &[
    "추가 검증",
    "가능성",
    "해석에 주의",
    "인과관계",
    "후속",
    "인과관계일 가능성",
];
const RESULTS_WARNING: &str =
    "[결과 경고] 상관관계를 성급하게 인과관계로 단정 짓고 있지 않나요? 추가 검증의 필요성을 언급하세요.";

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// IMRAD-structure gap checks for informational scripts: each section rule
/// warns when its marker keywords are absent; the results rule warns when a
/// correlation claim appears without hedging language.
pub fn structure_gaps(script: &str) -> Vec<String> {
    let mut gaps = Vec::new();

    for rule in [&INTRO_RULE, &METHODS_RULE, &DISCUSSION_RULE] {
        if !contains_any(script, rule.triggers) {
            gaps.push(rule.warning.to_string());
        }
    }

    if contains_any(script, RESULTS_CLAIM_TRIGGERS)
        && !contains_any(script, RESULTS_DEFENSE_TRIGGERS)
    {
        gaps.push(RESULTS_WARNING.to_string());
    }

    gaps
}

/// Per-mode coaching rubric handed to the text generator.
fn rubric(mode: PresentationMode) -> &'static str {
    match mode {
        PresentationMode::Informational => {
            "- [내용] IMRAD 구조/논리적 흐름\n- [표현] 정확한 수치/팩트 사용\n- [전달] 일정한 속도, 또렷한 발음"
        }
        PresentationMode::Persuasive => {
            "- [내용] 강력한 행동 촉구\n- [설득 기법] 심리적 트리거 활용\n- [전달] 속도와 성량의 드라마틱한 변화"
        }
        PresentationMode::Empathetic => {
            "- [내용] 진솔한 경험 공유\n- [표현] 자연스러운 구어체 사용\n- [전달] 편안하고 따뜻한 톤"
        }
    }
}

fn feedback_prompt(
    score: &ScoreReport,
    style_feedback: &str,
    energy_feedback: &str,
    gaps: &[String],
    transcript: &str,
) -> String {
    let gap_data = if gaps.is_empty() {
        "논리적 허점 없음".to_string()
    } else {
        gaps.join("\n")
    };

    format!(
        "당신은 날카롭지만 따뜻한 전문 발표 코치입니다. 샌드위치 피드백(칭찬-개선점-격려)을 제공합니다.\n\
         목표 유형: [{mode}] (기대 어조: {tone})\n\
         평가 기준:\n{rubric}\n\n\
         [자동 분석 데이터]\n\
         - 속도: {spm} SPM (목표: 350)\n\
         - 종합 점수: {composite}점 (전달 {delivery} / 시선 {gaze} / 유창성 {fluency} / 속도 {speed})\n\
         - 어조 피드백: \"{style}\"\n\
         - 에너지 피드백: \"{energy}\"\n\
         - 논리 구조 검증: \"{gaps}\"\n\n\
         위 데이터를 종합하여 베스트 포인트 1가지, 개선 솔루션 2가지, 따뜻한 총평으로 구성된 리포트를 작성하세요.\n\n\
         --- 발표 내용 (STT) ---\n{transcript}",
        mode = score.mode.display_name(),
        tone = score.mode.tone_name(),
        rubric = rubric(score.mode),
        spm = score.spm,
        composite = score.composite,
        delivery = score.delivery,
        gaze = score.gaze,
        fluency = score.fluency,
        speed = score.speed,
        style = style_feedback.trim(),
        energy = energy_feedback.trim(),
        gaps = gap_data,
    )
}
