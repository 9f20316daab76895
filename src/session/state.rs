use super::marker::{Marker, MarkerLabel, MarkerTimeline};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Shared state of one in-progress recording session.
///
/// Mutated concurrently under a single-writer-per-field discipline: the
/// video task owns the gaze frame counters; the audio task owns transcript,
/// unit/filler counts, tremble count, volumes and the PCM buffer. Markers
/// are the one cross-producer structure; pushes go through the timeline's
/// tail-checked dedup under its mutex. The main task only reads while
/// recording and becomes sole owner after the stop barrier.
pub struct SessionState {
    pub started_at: DateTime<Utc>,
    epoch: Instant,
    recording: AtomicBool,

    // Audio/recognition task
    pub transcript: Mutex<String>,
    pub unit_count: AtomicUsize,
    pub filler_count: AtomicUsize,
    pub tremble_count: AtomicU32,
    pub volumes: Mutex<Vec<f64>>,
    pub pcm: Mutex<Vec<i16>>,

    // Video task
    pub frames_total: AtomicUsize,
    pub frames_audience: AtomicUsize,
    pub frames_script: AtomicUsize,

    pub markers: Mutex<MarkerTimeline>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            epoch: Instant::now(),
            recording: AtomicBool::new(false),
            transcript: Mutex::new(String::new()),
            unit_count: AtomicUsize::new(0),
            filler_count: AtomicUsize::new(0),
            tremble_count: AtomicU32::new(0),
            volumes: Mutex::new(Vec::new()),
            pcm: Mutex::new(Vec::new()),
            frames_total: AtomicUsize::new(0),
            frames_audience: AtomicUsize::new(0),
            frames_script: AtomicUsize::new(0),
            markers: Mutex::new(MarkerTimeline::new()),
        }
    }

    pub fn set_recording(&self, value: bool) {
        self.recording.store(value, Ordering::SeqCst);
    }

    /// Stop flag polled by every producer at each iteration boundary.
    pub fn is_recording(&self) -> bool {
        self.recording.load(Ordering::SeqCst)
    }

    /// Seconds since the session started (monotonic).
    pub fn elapsed_secs(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    pub async fn push_marker(&self, offset_secs: f64, label: MarkerLabel) -> bool {
        let mut markers = self.markers.lock().await;
        markers.push(offset_secs, label)
    }

    /// Freeze the session into an immutable snapshot for scoring.
    ///
    /// Must only be called after every producer has been joined; the wall
    /// duration is replaced by the recorded-audio duration by the caller
    /// when one is available.
    pub async fn snapshot(&self, script: String, duration_secs: f64) -> SessionCounters {
        let transcript = self.transcript.lock().await.clone();
        let volumes = self.volumes.lock().await.clone();
        let markers = self.markers.lock().await.markers().to_vec();

        SessionCounters {
            script,
            transcript,
            unit_count: self.unit_count.load(Ordering::SeqCst),
            filler_count: self.filler_count.load(Ordering::SeqCst),
            frames_total: self.frames_total.load(Ordering::SeqCst),
            frames_audience: self.frames_audience.load(Ordering::SeqCst),
            frames_script: self.frames_script.load(Ordering::SeqCst),
            tremble_count: self.tremble_count.load(Ordering::SeqCst),
            volumes,
            markers,
            duration_secs,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable snapshot of a finished session, the input to scoring.
#[derive(Debug, Clone)]
pub struct SessionCounters {
    /// The prepared script the speaker practiced against
    pub script: String,
    /// Final session transcript (refined when a refiner succeeded)
    pub transcript: String,
    /// Recognized syllables (whitespace-stripped characters)
    pub unit_count: usize,
    pub filler_count: usize,
    pub frames_total: usize,
    pub frames_audience: usize,
    pub frames_script: usize,
    pub tremble_count: u32,
    /// Per-chunk RMS sequence, in arrival order
    pub volumes: Vec<f64>,
    pub markers: Vec<Marker>,
    /// Recorded-audio duration when available, wall-clock otherwise
    pub duration_secs: f64,
}

impl SessionCounters {
    pub fn duration_minutes(&self) -> f64 {
        (self.duration_secs / 60.0).max(0.01)
    }
}
