use anyhow::Result;

/// External natural-language text-generation collaborator.
///
/// Given a prompt, returns a free-text response. Treated as unreliable:
/// network and quota errors are expected, callers always carry a rule-based
/// fallback and never let a failure here block scoring.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
