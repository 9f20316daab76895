pub mod backend;
pub mod file;
pub mod level;
pub mod sink;

pub use backend::{AudioBackend, AudioBackendConfig, AudioFrame, FileBackend};
pub use file::AudioFile;
pub use level::{energy_score, rms, AudioLevelTracker};
pub use sink::WavSink;
