use anyhow::{Context, Result};
use hound::WavReader;
use std::path::Path;
use tracing::info;

/// A finalized session recording loaded back from disk.
pub struct AudioFile {
    pub path: String,
    pub duration_seconds: f64,
    pub sample_rate: u32,
    pub channels: u16,
    pub samples: Vec<i16>,
}

impl AudioFile {
    /// Load a session WAV fully into memory, e.g. for playback review or
    /// re-feeding through a `FileBackend`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let reader = WavReader::open(path)
            .with_context(|| format!("Failed to open recording: {}", path.display()))?;
        let spec = reader.spec();

        let samples: Vec<i16> = reader
            .into_samples::<i16>()
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to decode recording samples")?;

        let duration_seconds =
            samples.len() as f64 / (spec.sample_rate as f64 * spec.channels as f64);

        info!(
            "Recording loaded: {} ({:.1}s, {}Hz, {}ch)",
            path.display(),
            duration_seconds,
            spec.sample_rate,
            spec.channels
        );

        Ok(Self {
            path: path.display().to_string(),
            duration_seconds,
            sample_rate: spec.sample_rate,
            channels: spec.channels,
            samples,
        })
    }

    /// True recorded duration of a session WAV, preferred over wall-clock
    /// elapsed time for pace scoring (wall-clock includes setup latency).
    pub fn duration_of(path: impl AsRef<Path>) -> Result<f64> {
        let reader = WavReader::open(path.as_ref()).context("Failed to open WAV file")?;
        let spec = reader.spec();
        Ok(reader.duration() as f64 / spec.sample_rate as f64)
    }
}
