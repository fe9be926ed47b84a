//! Sentiment collaborator adapters

use async_trait::async_trait;
use complaint_triage_core::{Result, SentimentAnalyzer, SentimentLabel};

/// Analyzer used when no sentiment model is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NeutralSentimentAnalyzer;

#[async_trait]
impl SentimentAnalyzer for NeutralSentimentAnalyzer {
    async fn analyze(&self, _text: &str) -> Result<f32> {
        Ok(0.0)
    }

    fn name(&self) -> &str {
        "neutral"
    }
}

/// Score `text` and derive its label
///
/// Analyzer failures and non-finite scores yield `(0.0, neutral)`; finite
/// scores are clamped to [-1, 1].
pub async fn score_sentiment(analyzer: &dyn SentimentAnalyzer, text: &str) -> (f32, SentimentLabel) {
    match analyzer.analyze(text).await {
        Ok(score) if score.is_finite() => {
            let score = score.clamp(-1.0, 1.0);
            (score, SentimentLabel::from_score(score))
        }
        Ok(score) => {
            tracing::warn!(analyzer = analyzer.name(), score, "Non-finite sentiment score, using neutral");
            (0.0, SentimentLabel::Neutral)
        }
        Err(e) => {
            tracing::warn!(analyzer = analyzer.name(), error = %e, "Sentiment analysis failed, using neutral");
            (0.0, SentimentLabel::Neutral)
        }
    }
}
