pub mod gaze;

pub use gaze::{FaceLandmarks, FrameGazeEstimator, GazeEstimate, GazeSample};

use anyhow::Result;

/// A single captured video frame (row-major pixel data).
///
/// The pipeline never interprets pixels itself; they pass through to the
/// landmarker and the video sink. Frames arrive already flip-corrected.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Milliseconds since capture started
    pub timestamp_ms: u64,
}

/// Camera capture backend trait
///
/// `open` failing is a device error and aborts the session start. A failed
/// `next_frame` mid-session is transient: the caller skips the frame and
/// retries on a fixed backoff.
#[async_trait::async_trait]
pub trait CameraBackend: Send + Sync {
    /// Open the capture device at the requested resolution
    async fn open(&mut self, width: u32, height: u32) -> Result<()>;

    /// Capture the next frame
    async fn next_frame(&mut self) -> Result<VideoFrame>;

    /// Release the device
    async fn close(&mut self) -> Result<()>;

    /// Backend name for logging
    fn name(&self) -> &str;
}

/// Facial-landmark detector trait (MediaPipe-style 2D pixel-space points).
///
/// `None` means no face in the frame; that is a normal outcome, not an error.
pub trait FaceLandmarker: Send + Sync {
    fn detect(&mut self, frame: &VideoFrame) -> Option<FaceLandmarks>;
}

/// External video-file writer collaborator.
///
/// Receives every analyzed frame in order; the file format is its concern.
pub trait VideoSink: Send + Sync {
    fn write_frame(&mut self, frame: &VideoFrame) -> Result<()>;
}
