// Unit tests for the scoring engine: sub-score formulas, clamping under
// adversarial inputs and the per-mode composite blend.

use podium::{
    DeliveryStrategy, PaceAssessment, PresentationMode, ScoringEngine, SessionCounters,
};

fn empty_counters() -> SessionCounters {
    SessionCounters {
        script: String::new(),
        transcript: String::new(),
        unit_count: 0,
        filler_count: 0,
        frames_total: 0,
        frames_audience: 0,
        frames_script: 0,
        tremble_count: 0,
        volumes: Vec::new(),
        markers: Vec::new(),
        duration_secs: 60.0,
    }
}

fn engine(strategy: DeliveryStrategy) -> ScoringEngine {
    ScoringEngine::new(strategy, Vec::new())
}

#[test]
fn test_empty_transcript_scores_zero_delivery_and_full_fluency() {
    let counters = empty_counters();

    for mode in [
        PresentationMode::Informational,
        PresentationMode::Persuasive,
        PresentationMode::Empathetic,
    ] {
        let report = engine(DeliveryStrategy::SequenceSimilarity).score(&counters, mode);
        assert_eq!(report.delivery, 0, "empty transcript must score 0 delivery");
        assert_eq!(
            report.fluency, 100,
            "zero fillers and trembles must score 100 fluency"
        );
        assert!(report.composite <= 100);
    }
}

#[test]
fn test_perfect_informational_session_scores_100() {
    let script = "이번 연구는 기존 선행 연구와의 차별점을 분석하여 선정 이유를 밝히고 한계점을 고찰합니다";
    let mut counters = empty_counters();
    counters.script = script.to_string();
    counters.transcript = script.to_string();
    counters.unit_count = 350; // exactly the target rate over one minute
    counters.duration_secs = 60.0;
    counters.frames_total = 100;
    counters.frames_audience = 100;

    let report = engine(DeliveryStrategy::SequenceSimilarity)
        .score(&counters, PresentationMode::Informational);

    assert_eq!(report.delivery, 100);
    assert_eq!(report.speed, 100);
    assert_eq!(report.gaze, 100);
    assert_eq!(report.fluency, 100);
    assert_eq!(report.composite, 100);
    assert_eq!(report.pace, PaceAssessment::OnTarget);
}

#[test]
fn test_zero_speech_is_a_valid_low_score() {
    let counters = empty_counters();
    let report =
        engine(DeliveryStrategy::SequenceSimilarity).score(&counters, PresentationMode::Persuasive);

    // rate 0 against target 350: 100 - 0.4*350 = -40, floored at 0
    assert_eq!(report.speed, 0);
    assert_eq!(report.spm, 0);
    assert_eq!(report.pace, PaceAssessment::Slow);
    assert!(report.composite <= 100);
}

#[test]
fn test_clamping_holds_under_adversarial_counters() {
    let mut counters = empty_counters();
    counters.transcript = "아무 관련 없는 말만 계속 반복했습니다".to_string();
    counters.script = "완전히 다른 주제의 대본".to_string();
    counters.unit_count = usize::MAX / 1_000_000;
    counters.filler_count = 10_000;
    counters.tremble_count = u32::MAX;
    counters.frames_total = 10;
    counters.frames_audience = 0;
    counters.frames_script = 10;
    counters.duration_secs = 0.0; // degenerate duration

    for mode in [
        PresentationMode::Informational,
        PresentationMode::Persuasive,
        PresentationMode::Empathetic,
    ] {
        let report = engine(DeliveryStrategy::TokenOverlap).score(&counters, mode);
        assert!(report.composite <= 100);
        assert!(report.speed <= 100);
        assert!(report.delivery <= 100);
        assert!(report.gaze <= 100);
        assert!(report.fluency <= 100);
    }
}

#[test]
fn test_scoring_is_idempotent_on_a_frozen_session() {
    let mut counters = empty_counters();
    counters.script = "핵심 메시지를 전달하는 발표".to_string();
    counters.transcript = "핵심 메시지를 전달하는 발표 였습니다".to_string();
    counters.unit_count = 200;
    counters.filler_count = 3;
    counters.tremble_count = 12;
    counters.frames_total = 50;
    counters.frames_audience = 30;
    counters.frames_script = 10;
    counters.volumes = vec![100.0, 900.0, 400.0, 1200.0];
    counters.duration_secs = 45.0;

    let engine = engine(DeliveryStrategy::SequenceSimilarity);
    let first = engine.score(&counters, PresentationMode::Empathetic);
    let second = engine.score(&counters, PresentationMode::Empathetic);

    assert_eq!(first.composite, second.composite);
    assert_eq!(first.speed, second.speed);
    assert_eq!(first.delivery, second.delivery);
    assert_eq!(first.gaze, second.gaze);
    assert_eq!(first.fluency, second.fluency);
    assert_eq!(first.energy, second.energy);
}

#[test]
fn test_script_gaze_penalty_outweighs_base_ratio() {
    // 60% audience, 40% script: base 60 minus penalty 60 = 0
    let mut counters = empty_counters();
    counters.frames_total = 100;
    counters.frames_audience = 60;
    counters.frames_script = 40;

    let report = engine(DeliveryStrategy::SequenceSimilarity)
        .score(&counters, PresentationMode::Persuasive);
    assert_eq!(report.gaze, 0);
}

#[test]
fn test_zero_analyzed_frames_scores_zero_gaze() {
    let counters = empty_counters();
    let report = engine(DeliveryStrategy::SequenceSimilarity)
        .score(&counters, PresentationMode::Informational);
    assert_eq!(report.gaze, 0);
}

#[test]
fn test_fluency_penalties_accumulate() {
    let mut counters = empty_counters();
    counters.transcript = "음 어 그 발표를 시작하겠습니다".to_string();
    counters.filler_count = 10; // filler part: 100 - 30 = 70
    counters.tremble_count = 20; // tremble part over 1min: 100 - 40 = 60
    counters.duration_secs = 60.0;

    let report = engine(DeliveryStrategy::SequenceSimilarity)
        .score(&counters, PresentationMode::Informational);
    assert_eq!(report.fluency, 65);
}

#[test]
fn test_token_overlap_full_accuracy_for_informational() {
    let mut counters = empty_counters();
    counters.script = "인공지능 매출 데이터 고객 설문조사".to_string();
    counters.transcript = "인공지능 데이터 설문조사 결과입니다".to_string();
    counters.unit_count = 50;

    let report =
        engine(DeliveryStrategy::TokenOverlap).score(&counters, PresentationMode::Informational);

    // 3 of 5 script tokens delivered
    assert_eq!(report.delivery, 60);
}

#[test]
fn test_token_overlap_boosts_key_message_ratio_for_persuasive() {
    let mut counters = empty_counters();
    counters.script = "인공지능 매출 데이터 고객 설문조사".to_string();
    counters.transcript = "인공지능 데이터 설문조사 결과입니다".to_string();
    counters.unit_count = 50;

    let report =
        engine(DeliveryStrategy::TokenOverlap).score(&counters, PresentationMode::Persuasive);

    // 3 of 5 keywords, boosted by 1.25: 75
    assert_eq!(report.delivery, 75);
}

#[test]
fn test_sequence_similarity_ignores_punctuation() {
    let mut counters = empty_counters();
    counters.script = "여러분, 안녕하세요! 발표를 시작합니다.".to_string();
    counters.transcript = "여러분 안녕하세요 발표를 시작합니다".to_string();
    counters.unit_count = 50;

    let report = engine(DeliveryStrategy::SequenceSimilarity)
        .score(&counters, PresentationMode::Informational);
    assert_eq!(report.delivery, 100);
}

#[test]
fn test_short_transcript_scores_zero_delivery_for_both_strategies() {
    let mut counters = empty_counters();
    counters.script = "충분히 긴 발표 대본입니다".to_string();
    counters.transcript = "네".to_string();

    for strategy in [
        DeliveryStrategy::SequenceSimilarity,
        DeliveryStrategy::TokenOverlap,
    ] {
        let report = engine(strategy).score(&counters, PresentationMode::Informational);
        assert_eq!(report.delivery, 0);
    }
}
