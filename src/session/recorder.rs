use super::config::SessionConfig;
use super::marker::MarkerLabel;
use super::state::{SessionCounters, SessionState};
use crate::audio::{AudioBackend, AudioFile, AudioLevelTracker, WavSink};
use crate::history::ScoreHistory;
use crate::report::ChallengeQuestionGenerator;
use crate::scoring::{ScoreReport, ScoringEngine};
use crate::speech::{SpeechAnalyzer, SpeechRecognizer, TranscriptRefiner};
use crate::video::{CameraBackend, FaceLandmarker, FrameGazeEstimator, GazeSample, VideoSink};
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Fixed backoff after a transient camera read failure
const DEVICE_RETRY: Duration = Duration::from_millis(500);

/// How long the audio task waits for a frame before running its silence and
/// stop-flag checks anyway
const AUDIO_POLL_TIMEOUT: Duration = Duration::from_millis(500);

/// Recorder lifecycle. A start is rejected while a session is active
/// (Recording or Finalizing); Scored is the rest state after a finished
/// session and accepts the next start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    Idle,
    Recording,
    Finalizing,
    Scored,
}

/// Capture-side collaborators, exclusively owned by the recorder for the
/// duration of Recording + Finalizing.
pub struct CaptureDevices {
    pub camera: Box<dyn CameraBackend>,
    pub audio: Box<dyn AudioBackend>,
    pub landmarker: Box<dyn FaceLandmarker>,
    pub recognizer: Box<dyn SpeechRecognizer>,
    /// External video-file writer; None skips the video sink
    pub video_sink: Option<Box<dyn VideoSink>>,
}

/// Everything a finished session produces.
#[derive(Debug)]
pub struct SessionOutcome {
    pub report: ScoreReport,
    pub counters: SessionCounters,
    /// Finalized session audio, when any was captured
    pub wav_path: Option<PathBuf>,
}

/// Owns the concurrent capture lifecycle of one practice session at a time.
///
/// `start()` spawns two producer tasks into a fresh `SessionState`: a video
/// tick loop (gaze counters) and an audio loop (level tracking, recognition,
/// transcript/filler/tremble/volume). `stop()` clears the shared recording
/// flag, joins both tasks as the write barrier, flushes the WAV, optionally
/// refines the transcript, scores the frozen snapshot and appends the
/// composite to the history.
pub struct SessionRecorder {
    config: SessionConfig,
    state: RecorderState,
    session: Arc<SessionState>,
    filler_words: Vec<String>,

    devices: Option<CaptureDevices>,
    refiner: Option<Box<dyn TranscriptRefiner>>,
    language: String,
    questions: ChallengeQuestionGenerator,

    scoring: ScoringEngine,
    history: ScoreHistory,

    video_task: Option<JoinHandle<VideoTaskParts>>,
    audio_task: Option<JoinHandle<AudioTaskParts>>,
}

type VideoTaskParts = (
    Box<dyn CameraBackend>,
    Box<dyn FaceLandmarker>,
    Option<Box<dyn VideoSink>>,
);

type AudioTaskParts = (Box<dyn AudioBackend>, Box<dyn SpeechRecognizer>);

impl SessionRecorder {
    pub fn new(
        config: SessionConfig,
        devices: CaptureDevices,
        filler_words: Vec<String>,
        scoring: ScoringEngine,
        history: ScoreHistory,
    ) -> Self {
        Self {
            config,
            state: RecorderState::Idle,
            session: Arc::new(SessionState::new()),
            filler_words,
            devices: Some(devices),
            refiner: None,
            language: "ko".to_string(),
            questions: ChallengeQuestionGenerator::new(),
            scoring,
            history,
            video_task: None,
            audio_task: None,
        }
    }

    /// Attach an offline transcription collaborator for the second pass.
    pub fn with_refiner(mut self, refiner: Box<dyn TranscriptRefiner>, language: &str) -> Self {
        self.refiner = Some(refiner);
        self.language = language.to_string();
        self
    }

    /// Replace the default rule-based challenge-question generator.
    pub fn with_question_generator(mut self, questions: ChallengeQuestionGenerator) -> Self {
        self.questions = questions;
        self
    }

    pub fn state(&self) -> RecorderState {
        self.state
    }

    /// Live view of the in-progress session (read-only while recording).
    pub fn session(&self) -> Arc<SessionState> {
        Arc::clone(&self.session)
    }

    /// Transition Idle -> Recording.
    ///
    /// Opening either capture device is fatal to the transition: the error
    /// is reported, any already-opened device is released and the recorder
    /// stays Idle.
    pub async fn start(&mut self) -> Result<()> {
        if !matches!(self.state, RecorderState::Idle | RecorderState::Scored) {
            bail!("recording already in progress (state: {:?})", self.state);
        }

        let mut devices = self
            .devices
            .take()
            .context("capture devices not armed; previous session did not release them")?;

        info!("Starting session: {}", self.config.session_id);

        // Fresh state: all counters zero, marker timeline empty
        self.session = Arc::new(SessionState::new());

        if let Err(e) = devices
            .camera
            .open(self.config.frame_width, self.config.frame_height)
            .await
        {
            self.devices = Some(devices);
            return Err(e.context("Failed to open capture device"));
        }

        let audio_rx = match devices.audio.start().await {
            Ok(rx) => rx,
            Err(e) => {
                if let Err(close_err) = devices.camera.close().await {
                    warn!("Failed to release camera after audio error: {}", close_err);
                }
                self.devices = Some(devices);
                return Err(e.context("Failed to open audio stream"));
            }
        };

        self.session.set_recording(true);
        self.state = RecorderState::Recording;

        let CaptureDevices {
            camera,
            audio,
            landmarker,
            recognizer,
            video_sink,
        } = devices;

        self.video_task = Some(tokio::spawn(video_loop(
            Arc::clone(&self.session),
            camera,
            landmarker,
            video_sink,
            self.config.frame_interval,
        )));

        self.audio_task = Some(tokio::spawn(audio_loop(
            Arc::clone(&self.session),
            audio,
            audio_rx,
            recognizer,
            self.filler_words.clone(),
        )));

        info!("Session recording: {}", self.config.session_id);
        Ok(())
    }

    /// While Recording, place a challenge-question marker on the timeline
    /// and produce the question to throw at the speaker.
    pub async fn trigger_question(&self) -> Result<String> {
        if self.state != RecorderState::Recording {
            bail!("no active recording");
        }
        self.session
            .push_marker(self.session.elapsed_secs(), MarkerLabel::QuestionRaised)
            .await;
        Ok(self
            .questions
            .generate(&self.config.script, self.config.mode)
            .await)
    }

    /// Transition Recording -> Finalizing -> Scored.
    pub async fn stop(&mut self) -> Result<SessionOutcome> {
        if self.state != RecorderState::Recording {
            bail!("no recording to stop (state: {:?})", self.state);
        }

        info!("Stopping session: {}", self.config.session_id);
        self.state = RecorderState::Finalizing;

        let wall_duration = self.session.elapsed_secs();

        // Signal every producer loop; each exits at its next iteration
        self.session.set_recording(false);

        // Join barrier: all in-flight writes are observed before scoring
        let mut camera = None;
        if let Some(task) = self.video_task.take() {
            match task.await {
                Ok(parts) => camera = Some(parts),
                Err(e) => error!("Video task panicked: {}", e),
            }
        }

        let mut audio = None;
        if let Some(task) = self.audio_task.take() {
            match task.await {
                Ok(parts) => audio = Some(parts),
                Err(e) => error!("Audio task panicked: {}", e),
            }
        }

        // Flush buffered PCM to the session WAV; recorded duration beats
        // wall-clock for pace scoring when we have it
        let (wav_path, duration_secs) = self.flush_audio(wall_duration).await;

        // Optional offline second pass wholly replaces the streaming text
        if let (Some(refiner), Some(path)) = (&self.refiner, &wav_path) {
            match refiner.refine(path, &self.language).await {
                Ok(refined) if !refined.trim().is_empty() => {
                    info!("Transcript refined ({} chars)", refined.len());
                    *self.session.transcript.lock().await = refined;
                }
                Ok(_) => warn!("Refiner returned empty transcript, keeping streaming text"),
                Err(e) => warn!("Transcript refinement failed, keeping streaming text: {}", e),
            }
        }

        let counters = self
            .session
            .snapshot(self.config.script.clone(), duration_secs)
            .await;

        let report = self.scoring.score(&counters, self.config.mode);
        self.state = RecorderState::Scored;

        if let Err(e) = self.history.append(report.composite) {
            // Scoring already succeeded; a failed history write is not fatal
            warn!("Failed to persist score history: {}", e);
        }

        // Release devices for the next start()
        if let (Some((camera, landmarker, video_sink)), Some((audio, recognizer))) =
            (camera, audio)
        {
            self.devices = Some(CaptureDevices {
                camera,
                audio,
                landmarker,
                recognizer,
                video_sink,
            });
        }

        info!(
            "Session scored: {} (composite {})",
            self.config.session_id, report.composite
        );

        Ok(SessionOutcome {
            report,
            counters,
            wav_path,
        })
    }

    /// Past composite scores, oldest first.
    pub fn score_history(&self) -> &[u8] {
        self.history.scores()
    }

    async fn flush_audio(&self, wall_duration: f64) -> (Option<PathBuf>, f64) {
        let pcm = self.session.pcm.lock().await;
        if pcm.is_empty() {
            warn!("No audio captured; falling back to wall-clock duration");
            return (None, wall_duration);
        }

        let path = self.config.wav_path();
        let result = WavSink::create(&path, self.config.sample_rate, self.config.channels)
            .and_then(|mut sink| {
                sink.write_samples(&pcm)?;
                sink.finish()
            });

        match result {
            Ok(path) => {
                let duration = AudioFile::duration_of(&path).unwrap_or(wall_duration);
                (Some(path), duration)
            }
            Err(e) => {
                error!("Failed to write session WAV: {}", e);
                (None, wall_duration)
            }
        }
    }
}

/// Video producer: fixed-tick capture, landmark detection, gaze counting.
///
/// Owns the gaze counter family. Transient read failures are skipped with a
/// fixed backoff; landmark-geometry errors skip the frame entirely.
async fn video_loop(
    session: Arc<SessionState>,
    mut camera: Box<dyn CameraBackend>,
    mut landmarker: Box<dyn FaceLandmarker>,
    mut video_sink: Option<Box<dyn VideoSink>>,
    frame_interval: Duration,
) -> VideoTaskParts {
    let estimator = FrameGazeEstimator::new();
    let mut ticker = tokio::time::interval(frame_interval);

    info!("Video analysis task started");

    while session.is_recording() {
        ticker.tick().await;

        let frame = match camera.next_frame().await {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Frame capture failed, retrying: {}", e);
                tokio::time::sleep(DEVICE_RETRY).await;
                continue;
            }
        };

        match landmarker.detect(&frame) {
            Some(landmarks) => match estimator.estimate(&landmarks) {
                Ok(estimate) => {
                    session.frames_total.fetch_add(1, Ordering::SeqCst);
                    match estimate.sample {
                        GazeSample::Script => {
                            session.frames_script.fetch_add(1, Ordering::SeqCst);
                        }
                        GazeSample::Audience => {
                            session.frames_audience.fetch_add(1, Ordering::SeqCst);
                        }
                        GazeSample::Undetermined => {}
                    }
                }
                Err(e) => {
                    warn!("Skipping frame with unusable landmarks: {}", e);
                    continue;
                }
            },
            None => {
                // No face: counts toward the analyzed total, neither bucket
                session.frames_total.fetch_add(1, Ordering::SeqCst);
            }
        }

        if let Some(sink) = &mut video_sink {
            if let Err(e) = sink.write_frame(&frame) {
                warn!("Video sink write failed: {}", e);
            }
        }
    }

    if let Err(e) = camera.close().await {
        warn!("Failed to release camera: {}", e);
    }

    info!("Video analysis task stopped");
    (camera, landmarker, video_sink)
}

/// Audio producer: level tracking, raw PCM buffering, streaming recognition
/// and the fragment-driven marker logic.
///
/// Owns the transcript/filler/tremble/volume counter family.
async fn audio_loop(
    session: Arc<SessionState>,
    mut backend: Box<dyn AudioBackend>,
    mut audio_rx: mpsc::Receiver<crate::audio::AudioFrame>,
    mut recognizer: Box<dyn SpeechRecognizer>,
    filler_words: Vec<String>,
) -> AudioTaskParts {
    let mut tracker = AudioLevelTracker::new();
    let mut analyzer = SpeechAnalyzer::new(Arc::clone(&session), filler_words);

    info!("Audio capture task started");

    while session.is_recording() {
        let frame = match tokio::time::timeout(AUDIO_POLL_TIMEOUT, audio_rx.recv()).await {
            Ok(Some(frame)) => frame,
            Ok(None) => break, // stream ended
            Err(_) => {
                // No audio within the poll window; still check for silence
                analyzer.check_silence(session.elapsed_secs()).await;
                continue;
            }
        };

        let rms = tracker.update(&frame.samples);
        session
            .tremble_count
            .store(tracker.tremble_count(), Ordering::SeqCst);
        session.volumes.lock().await.push(rms);
        session.pcm.lock().await.extend_from_slice(&frame.samples);

        match recognizer.accept_frame(&frame) {
            Ok(Some(fragment)) => analyzer.on_fragment(&fragment).await,
            Ok(None) => {}
            Err(e) => {
                // Recognition misses are expected; keep listening
                warn!("Recognizer error on chunk, continuing: {}", e);
            }
        }

        analyzer.check_silence(session.elapsed_secs()).await;
    }

    // Flush the engine's last buffered hypothesis
    match recognizer.finalize() {
        Ok(Some(fragment)) => analyzer.on_fragment(&fragment).await,
        Ok(None) => {}
        Err(e) => warn!("Recognizer finalize failed: {}", e),
    }

    if let Err(e) = backend.stop().await {
        warn!("Failed to stop audio backend: {}", e);
    }

    info!("Audio capture task stopped");
    (backend, recognizer)
}
