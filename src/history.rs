use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// Append-only, ordered composite-score history persisted as a JSON array.
///
/// Insertion order is chronological; entries are never mutated or deduped.
/// Loading is lenient: a missing or unreadable file is an empty history, not
/// an error, so a corrupt file never blocks a practice session.
pub struct ScoreHistory {
    path: PathBuf,
    scores: Vec<u8>,
}

impl ScoreHistory {
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let scores = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(scores) => scores,
                Err(e) => {
                    warn!("Ignoring corrupt score history {:?}: {}", path, e);
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };

        Self { path, scores }
    }

    /// Append one composite score and persist the full sequence.
    pub fn append(&mut self, score: u8) -> Result<()> {
        self.scores.push(score);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).context("Failed to create history directory")?;
            }
        }

        let raw = serde_json::to_string_pretty(&self.scores)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("Failed to write score history: {:?}", self.path))?;

        Ok(())
    }

    /// Full ordered score sequence, oldest first.
    pub fn scores(&self) -> &[u8] {
        &self.scores
    }
}
