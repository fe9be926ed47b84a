//! Sentiment analyzer trait

use async_trait::async_trait;

use crate::Result;

/// Sentiment scoring collaborator
///
/// Returns a score in [-1, 1] where -1 is strongly negative and 1 strongly
/// positive. Map scores to labels with `SentimentLabel::from_score`.
///
/// Implementations:
/// - `NeutralSentimentAnalyzer` - Always 0.0 (no model configured)
#[async_trait]
pub trait SentimentAnalyzer: Send + Sync + 'static {
    /// Score the sentiment of `text`
    async fn analyze(&self, text: &str) -> Result<f32>;

    /// Analyzer name for logging
    fn name(&self) -> &str;
}
