// Tests for the anxiety-simulation soundscape: waveform shape and the
// start/stop lifecycle of the playback loop.

use anyhow::Result;
use podium::ambience::{heartbeat_loop_samples, AnxietySimulator, AudioOutput};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

struct CountingOutput {
    plays: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl AudioOutput for CountingOutput {
    async fn play(&mut self, samples: &[i16]) -> Result<()> {
        assert!(!samples.is_empty());
        self.plays.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(10)).await;
        Ok(())
    }
}

#[test]
fn test_heartbeat_buffer_covers_one_period() {
    let samples = heartbeat_loop_samples(1);

    // One period at 115 BPM and 16kHz
    let expected = (16000.0 * 60.0 / 115.0) as usize;
    assert_eq!(samples.len(), expected);

    // The S1 pulse makes the start of the beat audibly louder than the tail
    let head_peak = samples[..1600].iter().map(|s| s.unsigned_abs()).max().unwrap();
    let tail_peak = samples[samples.len() - 1600..]
        .iter()
        .map(|s| s.unsigned_abs())
        .max()
        .unwrap();
    assert!(head_peak > tail_peak * 2);
}

#[test]
fn test_heartbeat_is_deterministic_per_seed() {
    assert_eq!(heartbeat_loop_samples(7), heartbeat_loop_samples(7));
    assert_ne!(heartbeat_loop_samples(7), heartbeat_loop_samples(8));
}

#[tokio::test]
async fn test_simulator_loops_until_stopped() {
    let plays = Arc::new(AtomicUsize::new(0));
    let mut simulator = AnxietySimulator::new();

    assert!(!simulator.is_active());
    simulator.start(Box::new(CountingOutput {
        plays: plays.clone(),
    }));
    assert!(simulator.is_active());

    tokio::time::sleep(Duration::from_millis(50)).await;
    let output = simulator.stop().await;

    assert!(!simulator.is_active());
    assert!(output.is_some(), "output device should be handed back");
    assert!(plays.load(Ordering::SeqCst) >= 2);

    // Stopped means stopped: the count no longer moves
    let after = plays.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(30)).await;
    assert_eq!(plays.load(Ordering::SeqCst), after);
}

#[tokio::test]
async fn test_double_start_is_a_no_op() {
    let plays = Arc::new(AtomicUsize::new(0));
    let mut simulator = AnxietySimulator::new();

    simulator.start(Box::new(CountingOutput {
        plays: plays.clone(),
    }));
    // Second start while active must not spawn a second loop
    simulator.start(Box::new(CountingOutput {
        plays: plays.clone(),
    }));

    tokio::time::sleep(Duration::from_millis(30)).await;
    simulator.stop().await;
    simulator.stop().await; // idempotent
}
