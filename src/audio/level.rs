/// Loudness jump threshold between consecutive chunks that counts as a
/// tremble event
const TREMBLE_DELTA: f64 = 2000.0;

/// Minimum RMS for a jump to count; keeps room noise out of the tremble count
const TREMBLE_FLOOR: f64 = 500.0;

/// Noise floor subtracted before scaling the volume standard deviation
const ENERGY_NOISE_FLOOR: f64 = 50.0;

/// Dynamic-range divisor mapping the stddev onto 0..100 (tuned to the
/// 0..32768 RMS scale of 16-bit PCM)
const ENERGY_RANGE: f64 = 450.0;

/// Streaming per-chunk loudness analyzer.
///
/// Computes the RMS amplitude of each audio chunk and counts tremble events:
/// sudden, non-trivial loudness jumps between consecutive chunks, a proxy for
/// vocal shakiness. O(1) per chunk; no raw audio is retained here.
#[derive(Debug, Default)]
pub struct AudioLevelTracker {
    last_rms: f64,
    tremble_count: u32,
}

impl AudioLevelTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one chunk of 16-bit PCM samples; returns the chunk RMS.
    pub fn update(&mut self, samples: &[i16]) -> f64 {
        let rms = rms(samples);

        if (rms - self.last_rms).abs() > TREMBLE_DELTA && rms > TREMBLE_FLOOR {
            self.tremble_count += 1;
        }
        self.last_rms = rms;

        rms
    }

    pub fn tremble_count(&self) -> u32 {
        self.tremble_count
    }

    pub fn reset(&mut self) {
        self.last_rms = 0.0;
        self.tremble_count = 0;
    }
}

/// Root-mean-square amplitude of a PCM chunk.
pub fn rms(samples: &[i16]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum_sq / samples.len() as f64).sqrt()
}

/// Map the standard deviation of a session's volume samples onto a 0..100
/// energy score. Interpreted per mode by the report builder: high rewarded
/// for persuasive delivery, low for informational, a mid band for empathetic.
pub fn energy_score(volumes: &[f64]) -> Option<u8> {
    if volumes.len() < 2 {
        return None;
    }

    let mean = volumes.iter().sum::<f64>() / volumes.len() as f64;
    let variance =
        volumes.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / volumes.len() as f64;
    let std_dev = variance.sqrt();

    let score = ((std_dev - ENERGY_NOISE_FLOOR) / ENERGY_RANGE * 100.0).clamp(0.0, 100.0);
    Some(score as u8)
}
