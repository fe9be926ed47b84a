//! Semantic classifier trait

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Label chosen by a semantic classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticLabel {
    /// One of the candidate labels
    pub label: String,
    /// Confidence in [0, 1]
    pub confidence: f32,
}

impl SemanticLabel {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// Model-backed category labeling
///
/// Implementations:
/// - `NoopSemanticClassifier` - Always unavailable (keyword path only)
/// - `StaticSemanticClassifier` - Fixed answer, for tests and demos
///
/// Callers treat this as best-effort: any error, timeout or low-confidence
/// answer falls through to keyword classification.
///
/// # Example
///
/// ```ignore
/// let semantic: Arc<dyn SemanticClassifier> = Arc::new(ZeroShotClassifier::new(model));
/// let labels = vec!["物流延迟".to_string(), "商品损坏".to_string()];
/// let result = semantic.classify("快递一周了还没到", &labels).await?;
/// // SemanticLabel { label: "物流延迟", confidence: 0.87 }
/// ```
#[async_trait]
pub trait SemanticClassifier: Send + Sync + 'static {
    /// Pick the best candidate label for `text`
    ///
    /// # Arguments
    /// * `text` - Complaint text
    /// * `candidate_labels` - Taxonomy category names, in taxonomy order
    async fn classify(&self, text: &str, candidate_labels: &[String]) -> Result<SemanticLabel>;

    /// Whether the backing model is loaded
    fn is_available(&self) -> bool {
        true
    }

    /// Classifier name for logging
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    struct FirstLabel;

    #[async_trait]
    impl SemanticClassifier for FirstLabel {
        async fn classify(&self, _text: &str, candidate_labels: &[String]) -> Result<SemanticLabel> {
            candidate_labels
                .first()
                .map(|label| SemanticLabel::new(label.clone(), 1.0))
                .ok_or_else(|| Error::Semantic("no candidate labels".to_string()))
        }

        fn name(&self) -> &str {
            "first-label"
        }
    }

    #[tokio::test]
    async fn test_mock_semantic_classifier() {
        let classifier = FirstLabel;
        assert!(classifier.is_available());

        let labels = vec!["a".to_string(), "b".to_string()];
        let result = classifier.classify("text", &labels).await.unwrap();
        assert_eq!(result.label, "a");

        let err = classifier.classify("text", &[]).await.unwrap_err();
        assert!(matches!(err, Error::Semantic(_)));
    }
}
