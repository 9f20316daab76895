use crate::audio::AudioFrame;
use crate::session::{MarkerLabel, SessionState};
use anyhow::Result;
use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::debug;

// Pace thresholds in syllables per minute. The counting unit is the
// whitespace-stripped character count of a fragment; these constants are
// tuned to that unit and must move together with it.
const FAST_SPM: f64 = 450.0;
const SLOW_SPM: f64 = 200.0;

/// Fragments shorter than this are too small for a meaningful slow-pace call
const SLOW_MIN_SYLLABLES: usize = 5;

/// Minimum gap between fragments before an instantaneous pace is computed;
/// avoids division noise on rapid-fire fragments
const MIN_PACE_GAP_SECS: f64 = 0.5;

/// Quiet time after the last completed fragment before a silence marker
const SILENCE_GAP_SECS: f64 = 5.0;

/// A recognized text fragment with its arrival offset.
#[derive(Debug, Clone)]
pub struct RecognizedFragment {
    pub text: String,
    /// Seconds since session start when the fragment completed
    pub offset_secs: f64,
}

/// Streaming speech-to-text engine seam, in push style: the audio task feeds
/// every captured chunk and the engine emits a fragment whenever it detects
/// an utterance boundary.
///
/// A timeout or unrecognizable utterance is a normal outcome (`Ok(None)`),
/// never an error that should stop the capture loop.
pub trait SpeechRecognizer: Send {
    /// Feed one audio chunk; returns a completed fragment, if any.
    fn accept_frame(&mut self, frame: &AudioFrame) -> Result<Option<RecognizedFragment>>;

    /// Flush the engine's final buffered hypothesis at session stop.
    fn finalize(&mut self) -> Result<Option<RecognizedFragment>>;
}

/// High-accuracy offline transcription collaborator.
///
/// Invoked at most once per session after the WAV is flushed; on success its
/// transcript wholly replaces the provisional streaming transcript.
#[async_trait::async_trait]
pub trait TranscriptRefiner: Send + Sync {
    async fn refine(&self, wav_path: &Path, language: &str) -> Result<String>;
}

/// Count the pace/transcript units in a fragment: syllables, i.e. the
/// whitespace-stripped character count.
pub fn syllable_count(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

/// Folds completed fragments into the shared session state: transcript
/// accumulation, syllable accrual, instantaneous pace markers, filler
/// counting and the debounced silence marker.
///
/// Owned by the audio task; the single writer for all speech-side counters.
pub struct SpeechAnalyzer {
    state: Arc<SessionState>,
    filler_words: HashSet<String>,
    /// Offset of the last completed fragment; moves only on recognized
    /// speech so the instantaneous pace gap stays speech-to-speech
    last_fragment_end: f64,
    /// Silence-debounce reference; also moves when a silence marker fires
    last_activity: f64,
}

impl SpeechAnalyzer {
    pub fn new(state: Arc<SessionState>, filler_words: impl IntoIterator<Item = String>) -> Self {
        Self {
            state,
            filler_words: filler_words.into_iter().collect(),
            last_fragment_end: 0.0,
            last_activity: 0.0,
        }
    }

    /// Process one completed fragment.
    pub async fn on_fragment(&mut self, fragment: &RecognizedFragment) {
        let text = fragment.text.trim();
        if text.is_empty() {
            return;
        }

        debug!("Recognized fragment: {}", text);

        let syllables = syllable_count(text);

        {
            let mut transcript = self.state.transcript.lock().await;
            transcript.push_str(text);
            transcript.push(' ');
        }
        self.state.unit_count.fetch_add(syllables, Ordering::SeqCst);

        // Instantaneous pace over the gap since the previous fragment end
        let gap = fragment.offset_secs - self.last_fragment_end;
        if gap > MIN_PACE_GAP_SECS {
            let instant_spm = syllables as f64 / gap * 60.0;
            if instant_spm > FAST_SPM {
                self.state
                    .push_marker(fragment.offset_secs, MarkerLabel::PaceTooFast)
                    .await;
            } else if instant_spm < SLOW_SPM && syllables > SLOW_MIN_SYLLABLES {
                self.state
                    .push_marker(fragment.offset_secs, MarkerLabel::PaceTooSlow)
                    .await;
            }
        }
        self.last_fragment_end = fragment.offset_secs;
        self.last_activity = fragment.offset_secs;

        let fillers = text
            .split_whitespace()
            .filter(|token| self.filler_words.contains(*token))
            .count();
        if fillers > 0 {
            self.state.filler_count.fetch_add(fillers, Ordering::SeqCst);
            self.state
                .push_marker(fragment.offset_secs, MarkerLabel::FillerWord)
                .await;
        }
    }

    /// Emit a silence marker when no fragment has completed for the silence
    /// gap. Debounced: the reference resets on emission, so the same gap
    /// must elapse again before the next one.
    pub async fn check_silence(&mut self, now_secs: f64) {
        if now_secs - self.last_activity > SILENCE_GAP_SECS {
            self.state.push_marker(now_secs, MarkerLabel::Silence).await;
            self.last_activity = now_secs;
        }
    }
}
