use anyhow::{Context, Result};
use clap::Parser;
use podium::report::structure_gaps;
use podium::speech::syllable_count;
use podium::{AudioFile, Config, PresentationMode, ScoreHistory};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "podium", about = "Presentation-practice coach")]
struct Args {
    /// Configuration file (TOML), without extension
    #[arg(long, default_value = "config/podium")]
    config: String,

    /// Target rhetorical style for the next session
    #[arg(long, value_enum, default_value = "informational")]
    mode: PresentationMode,

    /// Script file the next session is scored against
    #[arg(long)]
    script: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("Podium v0.1.0");
    info!("Target mode: {}", args.mode.display_name());
    info!("Recordings directory: {}", cfg.audio.recordings_path);

    if let Some(path) = &args.script {
        let script = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script: {:?}", path))?;
        info!("Script loaded: {} syllables", syllable_count(&script));

        if args.mode == PresentationMode::Informational {
            for gap in structure_gaps(&script) {
                warn!("{}", gap);
            }
        }
    }

    let history = ScoreHistory::load(&cfg.coaching.history_path);
    if history.scores().is_empty() {
        info!("No practice history yet");
    } else {
        info!(
            "{} past sessions, last composite score: {}",
            history.scores().len(),
            history.scores().last().copied().unwrap_or(0)
        );
    }

    // Inspect the most recent recording if one exists
    let latest = std::path::Path::new(&cfg.audio.recordings_path).join("latest.wav");
    if latest.exists() {
        let audio = AudioFile::open(&latest)?;
        info!(
            "Last recording: {:.1}s, {}Hz, {} channels",
            audio.duration_seconds, audio.sample_rate, audio.channels
        );
    }

    Ok(())
}
