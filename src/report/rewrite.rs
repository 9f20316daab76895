//! Mode-styled script rewriting through the text-generation collaborator.
//!
//! Entirely off the scoring path: failures surface to the caller and affect
//! nothing else.

use super::textgen::TextGenerator;
use crate::mode::PresentationMode;
use anyhow::{Context, Result};

fn style_guide(mode: PresentationMode) -> &'static str {
    match mode {
        PresentationMode::Informational => {
            "1. [구조] 가능하다면 서론(배경/목적)-방법-결과-고찰 순서로 재구성하세요.\n\
             2. [명료성] 모호한 수식어를 본문 속 정확한 데이터로 교체하고 감정적 표현을 제거하세요.\n\
             3. [어조] 객관적이고 전문적이며 분석적인 어조를 유지하세요."
        }
        PresentationMode::Persuasive => {
            "1. [구조] 주의-필요-해결-시각화-행동 순서의 동기 유발 구성을 사용하세요.\n\
             2. [설득] 권위, 희소성, 사회적 증거의 원칙을 적용하고, 지금 행동하지 않으면 잃는 것을 강조하세요.\n\
             3. [표현] 강하고 단정적인 행동 동사를 사용하세요."
        }
        PresentationMode::Empathetic => {
            "1. [구조] 시련-깨달음-성장의 스토리 아크를 사용하세요.\n\
             2. [연결] 작은 약점을 솔직하게 인정하고 '우리' 중심의 언어와 부드러운 수사적 질문을 사용하세요.\n\
             3. [어조] 따뜻하고 진솔한 구어체(~했어요, ~잖아요)를 사용하세요."
        }
    }
}

/// Rewrite a script into the target mode's style.
pub async fn rewrite_script(
    generator: &dyn TextGenerator,
    script: &str,
    mode: PresentationMode,
) -> Result<String> {
    let prompt = format!(
        "당신은 전문 스피치라이터이자 커뮤니케이션 심리학자입니다.\n\
         다음 규칙을 엄격히 지키며 사용자의 대본을 다시 작성하세요:\n\
         - 원문에 없는 새로운 사실이나 데이터를 추가하지 마세요.\n\
         - 핵심 메시지를 보존하세요.\n\
         - 소리 내어 읽기 자연스러운 한국어 구어체여야 합니다.\n\n\
         ### 목표 스타일: {name}\n\
         가이드라인:\n{guide}\n\n\
         재작성된 대본만 한국어로 출력하세요. 서두나 맺음말을 붙이지 마세요.\n\n\
         --- 사용자 대본 ---\n{script}",
        name = mode.display_name(),
        guide = style_guide(mode),
    );

    generator
        .generate(&prompt)
        .await
        .context("Script rewriting failed")
}
