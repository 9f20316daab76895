use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Target rhetorical style for a practice session.
///
/// Replaces the stringly-typed mode matching of earlier prototypes with a
/// closed set; all per-mode thresholds and weights hang off this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PresentationMode {
    /// Accuracy-first delivery of facts (lecture, research talk)
    Informational,
    /// Energy-first call to action (pitch, motivational talk)
    Persuasive,
    /// Balance-first relational delivery (storytelling, team talk)
    Empathetic,
}

/// Per-mode blend of sub-scores into the composite score.
///
/// Weights sum to 1.0 and are part of the scoring contract: changing them
/// would break comparability of the persisted score history.
#[derive(Debug, Clone, Copy)]
pub struct CompositeWeights {
    pub delivery: f64,
    pub gaze: f64,
    pub fluency: f64,
    pub speed: f64,
}

impl PresentationMode {
    pub fn composite_weights(&self) -> CompositeWeights {
        match self {
            PresentationMode::Informational => CompositeWeights {
                delivery: 0.4,
                fluency: 0.3,
                gaze: 0.2,
                speed: 0.1,
            },
            PresentationMode::Persuasive => CompositeWeights {
                gaze: 0.4,
                speed: 0.2,
                fluency: 0.2,
                delivery: 0.2,
            },
            PresentationMode::Empathetic => CompositeWeights {
                delivery: 0.3,
                gaze: 0.3,
                fluency: 0.2,
                speed: 0.2,
            },
        }
    }

    /// Human-readable name used in reports and prompts.
    pub fn display_name(&self) -> &'static str {
        match self {
            PresentationMode::Informational => "정보 전달형",
            PresentationMode::Persuasive => "설득/동기부여형",
            PresentationMode::Empathetic => "공감/소통형",
        }
    }

    /// Tone the coach evaluates against (formal, passionate, friendly).
    pub fn tone_name(&self) -> &'static str {
        match self {
            PresentationMode::Informational => "논리적",
            PresentationMode::Persuasive => "열정적",
            PresentationMode::Empathetic => "친화적",
        }
    }
}
