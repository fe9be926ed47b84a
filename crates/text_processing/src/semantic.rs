//! Semantic classifier adapters
//!
//! No model ships with this crate. A deployment injects its own
//! [`SemanticClassifier`]; otherwise the engine runs keyword-only.

use async_trait::async_trait;
use complaint_triage_config::ClassifierSettings;
use complaint_triage_core::{Error, Result, SemanticClassifier, SemanticLabel};
use std::sync::Arc;

/// Semantic classifier that is never available
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSemanticClassifier;

#[async_trait]
impl SemanticClassifier for NoopSemanticClassifier {
    async fn classify(&self, _text: &str, _candidate_labels: &[String]) -> Result<SemanticLabel> {
        Err(Error::Unavailable("no semantic model configured".to_string()))
    }

    fn is_available(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "noop"
    }
}

/// Semantic classifier with a fixed answer
///
/// Useful for demos and for exercising the fallback paths of the engine.
#[derive(Debug, Clone)]
pub struct StaticSemanticClassifier {
    label: String,
    confidence: f32,
}

impl StaticSemanticClassifier {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

#[async_trait]
impl SemanticClassifier for StaticSemanticClassifier {
    async fn classify(&self, _text: &str, candidate_labels: &[String]) -> Result<SemanticLabel> {
        if candidate_labels.is_empty() {
            return Err(Error::InvalidInput("no candidate labels".to_string()));
        }
        Ok(SemanticLabel::new(self.label.clone(), self.confidence))
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// Pick the semantic backend based on config
pub fn create_semantic_classifier(
    settings: &ClassifierSettings,
    backend: Option<Arc<dyn SemanticClassifier>>,
) -> Arc<dyn SemanticClassifier> {
    match (settings.semantic_enabled, backend) {
        (true, Some(backend)) => backend,
        (true, None) => {
            tracing::warn!("Semantic classification enabled but no backend supplied, using keywords only");
            Arc::new(NoopSemanticClassifier)
        }
        (false, _) => Arc::new(NoopSemanticClassifier),
    }
}
