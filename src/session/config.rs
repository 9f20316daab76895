use crate::mode::PresentationMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for one recording session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unique session identifier (e.g., "practice-2026-08-30-rehearsal")
    pub session_id: String,

    /// Target rhetorical style, drives thresholds and composite weights
    pub mode: PresentationMode,

    /// The prepared script the speaker practices against
    pub script: String,

    /// Directory where the session WAV lands at finalization
    pub recordings_dir: PathBuf,

    /// Sample rate for audio capture (recognizers expect 16kHz)
    pub sample_rate: u32,

    /// Number of audio channels (1 = mono)
    pub channels: u16,

    /// Video analysis tick interval
    pub frame_interval: Duration,

    /// Capture resolution handed to the camera backend
    pub frame_width: u32,
    pub frame_height: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: format!("practice-{}", uuid::Uuid::new_v4()),
            mode: PresentationMode::Informational,
            script: String::new(),
            recordings_dir: PathBuf::from("recordings"),
            sample_rate: 16000,
            channels: 1,
            frame_interval: Duration::from_millis(50), // ~20fps analysis tick
            frame_width: 640,
            frame_height: 360,
        }
    }
}

impl SessionConfig {
    /// Path of this session's finalized WAV file.
    pub fn wav_path(&self) -> PathBuf {
        self.recordings_dir.join(format!("{}.wav", self.session_id))
    }
}
