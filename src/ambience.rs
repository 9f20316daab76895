//! Anxiety-simulation soundscape: a synthesized heartbeat with tinnitus and
//! noise, looped best-effort while the speaker practices under pressure.
//!
//! Strictly a feedback aid; nothing here touches session state or scoring.

use anyhow::Result;
use std::f64::consts::PI;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::warn;

const SAMPLE_RATE: u32 = 16000;
const HEART_BPM: f64 = 115.0;

/// Low "lub" tone frequency and decay
const S1_FREQ: f64 = 40.0;
const S1_DECAY: f64 = 25.0;

/// Higher "dub" tone, delayed within the beat
const S2_FREQ: f64 = 60.0;
const S2_DECAY: f64 = 35.0;
const S2_DELAY_SECS: f64 = 0.2;

const TINNITUS_FREQ: f64 = 8500.0;
const TINNITUS_LEVEL: f64 = 0.04;
const NOISE_LEVEL: f64 = 0.015;

/// Playback device seam for the ambient loop.
#[async_trait::async_trait]
pub trait AudioOutput: Send {
    /// Play one buffer to completion.
    async fn play(&mut self, samples: &[i16]) -> Result<()>;
}

/// Synthesize one heartbeat period (S1 "lub" + delayed S2 "dub") with a
/// high-frequency tinnitus tone and white noise, as 16-bit mono PCM.
pub fn heartbeat_loop_samples(seed: u64) -> Vec<i16> {
    let period_secs = 60.0 / HEART_BPM;
    let len = (SAMPLE_RATE as f64 * period_secs) as usize;
    let mut noise = NoiseSource::new(seed);

    (0..len)
        .map(|i| {
            let t = i as f64 / SAMPLE_RATE as f64;

            let s1_env = (-t * S1_DECAY).exp();
            let s1 = ((2.0 * PI * S1_FREQ * t).sin()
                + 0.6 * (2.0 * PI * (S1_FREQ - 15.0) * t).sin())
                * s1_env;

            let t2 = t - S2_DELAY_SECS;
            let s2 = if t2 > 0.0 {
                (2.0 * PI * S2_FREQ * t2).sin() * (-t2 * S2_DECAY).exp() * 0.8
            } else {
                0.0
            };

            let tinnitus = (2.0 * PI * TINNITUS_FREQ * t).sin() * TINNITUS_LEVEL;

            let sample = (s1 + s2) * 1.2 + tinnitus + noise.next_in(NOISE_LEVEL);
            (sample.clamp(-1.0, 1.0) * i16::MAX as f64) as i16
        })
        .collect()
}

/// Best-effort ambient playback task gated on a shared flag.
pub struct AnxietySimulator {
    active: Arc<AtomicBool>,
    task: Option<JoinHandle<Box<dyn AudioOutput>>>,
}

impl AnxietySimulator {
    pub fn new() -> Self {
        Self {
            active: Arc::new(AtomicBool::new(false)),
            task: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Start looping the heartbeat on the given output until `stop`.
    pub fn start(&mut self, mut output: Box<dyn AudioOutput>) {
        if self.active.swap(true, Ordering::SeqCst) {
            return; // already running
        }

        let active = Arc::clone(&self.active);
        let samples = heartbeat_loop_samples(0x5eed);

        self.task = Some(tokio::spawn(async move {
            while active.load(Ordering::SeqCst) {
                if let Err(e) = output.play(&samples).await {
                    // Playback is a comfort feature; never escalate
                    warn!("Ambient playback error: {}", e);
                    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                }
            }
            output
        }));
    }

    /// Stop the loop and wait for the playback task; returns the output
    /// device for reuse.
    pub async fn stop(&mut self) -> Option<Box<dyn AudioOutput>> {
        self.active.store(false, Ordering::SeqCst);
        match self.task.take() {
            Some(task) => match task.await {
                Ok(output) => Some(output),
                Err(e) => {
                    warn!("Ambient playback task panicked: {}", e);
                    None
                }
            },
            None => None,
        }
    }
}

impl Default for AnxietySimulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic xorshift white-noise source.
struct NoiseSource {
    state: u64,
}

impl NoiseSource {
    fn new(seed: u64) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    /// Uniform sample in [-level, level].
    fn next_in(&mut self, level: f64) -> f64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        let unit = (self.state >> 11) as f64 / (1u64 << 53) as f64;
        (unit * 2.0 - 1.0) * level
    }
}
