//! Recording session management
//!
//! This module provides the session lifecycle:
//! - Shared session state under single-writer-per-field discipline
//! - The deduplicated marker timeline
//! - The `SessionRecorder` that owns start/stop and the producer tasks

mod config;
mod marker;
mod recorder;
mod state;

pub use config::SessionConfig;
pub use marker::{Marker, MarkerLabel, MarkerTimeline};
pub use recorder::{CaptureDevices, RecorderState, SessionOutcome, SessionRecorder};
pub use state::{SessionCounters, SessionState};
