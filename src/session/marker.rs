use serde::{Deserialize, Serialize};

/// Same-label markers closer together than this are suppressed
const DEDUP_WINDOW_SECS: f64 = 1.5;

/// Markers are clamped to this minimum offset so they stay visible on a
/// duration-relative timeline
const MIN_OFFSET_SECS: f64 = 0.1;

/// Event tags placed on the session timeline for playback review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerLabel {
    PaceTooFast,
    PaceTooSlow,
    FillerWord,
    Silence,
    QuestionRaised,
}

/// A timestamped, labeled event on the session timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Seconds since session start, monotonic, >= 0.1
    pub offset_secs: f64,
    pub label: MarkerLabel,
}

/// Deduplicated, time-ordered event log.
///
/// A new marker is suppressed when the immediately preceding marker carries
/// the same label within the dedup window, keeping the timeline sparse
/// rather than one marker per recognized utterance. Markers are read-only
/// after the session stops; there is no removal operation.
#[derive(Debug, Clone, Default)]
pub struct MarkerTimeline {
    markers: Vec<Marker>,
}

impl MarkerTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a marker unless the dedup rule suppresses it.
    ///
    /// Returns true when the marker was recorded. Producers must push with
    /// non-decreasing timestamps for the tail check to stay meaningful.
    pub fn push(&mut self, offset_secs: f64, label: MarkerLabel) -> bool {
        let offset_secs = offset_secs.max(MIN_OFFSET_SECS);

        if let Some(last) = self.markers.last() {
            if last.label == label && offset_secs - last.offset_secs <= DEDUP_WINDOW_SECS {
                return false;
            }
        }

        self.markers.push(Marker { offset_secs, label });
        true
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
