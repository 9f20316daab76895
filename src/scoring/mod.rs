pub mod delivery;

pub use delivery::{delivery_score, DeliveryStrategy};

use crate::audio::energy_score;
use crate::mode::PresentationMode;
use crate::session::SessionCounters;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Target speaking pace in syllables per minute
const TARGET_SPM: f64 = 350.0;

/// Points lost per SPM of deviation from the target
const SPEED_PENALTY_PER_SPM: f64 = 0.4;

/// Band outside which the pace assessment flips to slow/fast
const SLOW_SPM_BOUND: f64 = 280.0;
const FAST_SPM_BOUND: f64 = 420.0;

/// Weight of the looking-down penalty relative to the audience-gaze base
const SCRIPT_GAZE_PENALTY: f64 = 150.0;

/// Points lost per counted filler word
const FILLER_PENALTY: f64 = 3.0;

/// Points lost per tremble event per minute
const TREMBLE_PENALTY: f64 = 2.0;

/// Qualitative pace verdict shown alongside the speed score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaceAssessment {
    Slow,
    OnTarget,
    Fast,
}

/// The scored outcome of one session. Immutable once computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    pub mode: PresentationMode,
    /// Sub-scores, each 0..=100
    pub speed: u8,
    pub delivery: u8,
    pub gaze: u8,
    pub fluency: u8,
    /// Fixed per-mode convex blend of the sub-scores, 0..=100
    pub composite: u8,
    /// Measured syllables per minute
    pub spm: u32,
    pub pace: PaceAssessment,
    /// Vocal-energy score (volume dynamics); None when too few samples
    pub energy: Option<u8>,
}

/// Pure scoring of a frozen session snapshot.
///
/// Holds only configuration (delivery strategy and stop words); calling
/// `score` twice on the same counters yields an identical report.
pub struct ScoringEngine {
    strategy: DeliveryStrategy,
    stopwords: HashSet<String>,
}

impl ScoringEngine {
    pub fn new(strategy: DeliveryStrategy, stopwords: impl IntoIterator<Item = String>) -> Self {
        Self {
            strategy,
            stopwords: stopwords.into_iter().collect(),
        }
    }

    pub fn score(&self, counters: &SessionCounters, mode: PresentationMode) -> ScoreReport {
        let duration_min = counters.duration_minutes();

        let spm = if counters.unit_count > 0 {
            counters.unit_count as f64 / duration_min
        } else {
            0.0
        };
        let speed = speed_score(spm);
        let pace = if spm < SLOW_SPM_BOUND {
            PaceAssessment::Slow
        } else if spm > FAST_SPM_BOUND {
            PaceAssessment::Fast
        } else {
            PaceAssessment::OnTarget
        };

        let delivery = delivery_score(
            self.strategy,
            &counters.script,
            &counters.transcript,
            mode,
            &self.stopwords,
        );

        let gaze = gaze_score(
            counters.frames_audience,
            counters.frames_script,
            counters.frames_total,
        );

        let fluency = fluency_score(counters.filler_count, counters.tremble_count, duration_min);

        let weights = mode.composite_weights();
        let composite = (delivery as f64 * weights.delivery
            + gaze as f64 * weights.gaze
            + fluency as f64 * weights.fluency
            + speed as f64 * weights.speed)
            .round()
            .clamp(0.0, 100.0) as u8;

        ScoreReport {
            mode,
            speed,
            delivery,
            gaze,
            fluency,
            composite,
            spm: spm.round() as u32,
            pace,
            energy: energy_score(&counters.volumes),
        }
    }
}

/// `max(0, 100 − 0.4·|target − spm|)`
fn speed_score(spm: f64) -> u8 {
    let penalty = (TARGET_SPM - spm).abs() * SPEED_PENALTY_PER_SPM;
    (100.0 - penalty).clamp(0.0, 100.0) as u8
}

/// Audience-gaze ratio minus a heavier penalty for script-gaze frames.
/// Zero analyzed frames score 0 rather than dividing by zero.
fn gaze_score(audience: usize, script: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let base = audience as f64 / total as f64 * 100.0;
    let penalty = script as f64 / total as f64 * SCRIPT_GAZE_PENALTY;
    (base - penalty).clamp(0.0, 100.0) as u8
}

/// Mean of the filler-derived and tremble-rate-derived scores.
fn fluency_score(fillers: usize, trembles: u32, duration_min: f64) -> u8 {
    let filler_part = (100.0 - fillers as f64 * FILLER_PENALTY).max(0.0);
    let tremble_part = (100.0 - trembles as f64 / duration_min * TREMBLE_PENALTY).max(0.0);
    (((filler_part + tremble_part) / 2.0) as u8).min(100)
}
