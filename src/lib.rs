pub mod ambience;
pub mod audio;
pub mod config;
pub mod history;
pub mod mode;
pub mod report;
pub mod scoring;
pub mod session;
pub mod speech;
pub mod video;

pub use audio::{
    energy_score, AudioBackend, AudioBackendConfig, AudioFile, AudioFrame, AudioLevelTracker,
    FileBackend, WavSink,
};
pub use config::Config;
pub use history::ScoreHistory;
pub use mode::PresentationMode;
pub use report::{ChallengeQuestionGenerator, CoachingReportBuilder, TextGenerator};
pub use scoring::{DeliveryStrategy, PaceAssessment, ScoreReport, ScoringEngine};
pub use session::{
    CaptureDevices, Marker, MarkerLabel, MarkerTimeline, RecorderState, SessionConfig,
    SessionCounters, SessionOutcome, SessionRecorder, SessionState,
};
pub use speech::{RecognizedFragment, SpeechRecognizer, TranscriptRefiner};
pub use video::{
    CameraBackend, FaceLandmarker, FaceLandmarks, FrameGazeEstimator, GazeEstimate, GazeSample,
    VideoFrame, VideoSink,
};
