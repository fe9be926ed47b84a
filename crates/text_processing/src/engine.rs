//! Complaint classification facade
//!
//! Composes the keyword classifier, the optional semantic classifier, the
//! entity extractor and the severity scorer into the two public operations
//! consumed by the processing pipeline: [`ComplaintClassifier::classify`] and
//! [`ComplaintClassifier::extract_key_info`], plus [`ComplaintClassifier::process`]
//! which produces the full downstream record.
//!
//! The facade holds no mutable state of its own. The taxonomy is read through
//! a snapshot per call, so a concurrent reload never changes the category set
//! in the middle of a classification.

use complaint_triage_config::{ClassifierSettings, SeverityBuckets, Settings, Taxonomy, TaxonomyManager};
use complaint_triage_core::{
    ClassificationResult, ComplaintRecord, Error, ExtractedInfo, SemanticClassifier,
    UNCLASSIFIED,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::classifier::KeywordClassifier;
use crate::entities::EntityExtractor;
use crate::semantic::{create_semantic_classifier, NoopSemanticClassifier};
use crate::severity::SeverityScorer;
use crate::{Result, TextProcessingError};

/// Which path produced a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationMethod {
    /// Empty input, no classification attempted
    Empty,
    Keyword,
    Semantic,
}

/// Category plus diagnostics about how it was chosen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationOutcome {
    pub category: String,
    pub method: ClassificationMethod,
    /// Semantic confidence, when the semantic path won
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl ClassificationOutcome {
    fn empty() -> Self {
        Self {
            category: UNCLASSIFIED.to_string(),
            method: ClassificationMethod::Empty,
            confidence: None,
        }
    }
}

impl From<ClassificationOutcome> for ClassificationResult {
    fn from(outcome: ClassificationOutcome) -> Self {
        ClassificationResult::new(outcome.category)
    }
}

/// Rule-based complaint classifier with an optional semantic front
pub struct ComplaintClassifier {
    taxonomy: Arc<TaxonomyManager>,
    keywords: KeywordClassifier,
    extractor: EntityExtractor,
    severity: SeverityScorer,
    semantic: Arc<dyn SemanticClassifier>,
    settings: ClassifierSettings,
}

impl ComplaintClassifier {
    /// Keyword-only classifier over a fixed taxonomy
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self::with_taxonomy_manager(Arc::new(TaxonomyManager::new(taxonomy)))
    }

    /// Classifier reading from a shared, reloadable taxonomy
    pub fn with_taxonomy_manager(taxonomy: Arc<TaxonomyManager>) -> Self {
        Self {
            taxonomy,
            keywords: KeywordClassifier::new(),
            extractor: EntityExtractor::new(),
            severity: SeverityScorer::default(),
            semantic: Arc::new(NoopSemanticClassifier),
            settings: ClassifierSettings::default(),
        }
    }

    /// Build from application settings
    ///
    /// Fails when the configured taxonomy cannot be loaded or the settings
    /// are invalid; the engine never starts without a valid taxonomy.
    pub fn from_settings(
        settings: &Settings,
        semantic: Option<Arc<dyn SemanticClassifier>>,
    ) -> Result<Self> {
        settings.validate()?;
        let taxonomy = Arc::new(settings.taxonomy_manager()?);

        Ok(Self::with_taxonomy_manager(taxonomy)
            .with_semantic(create_semantic_classifier(&settings.classifier, semantic))
            .with_settings(settings.classifier.clone()))
    }

    /// Set the semantic backend; it runs only when `semantic_enabled` is set
    pub fn with_semantic(mut self, semantic: Arc<dyn SemanticClassifier>) -> Self {
        self.semantic = semantic;
        self
    }

    pub fn with_settings(mut self, settings: ClassifierSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_severity_buckets(mut self, buckets: SeverityBuckets) -> Self {
        self.severity = SeverityScorer::new(buckets);
        self
    }

    /// Current taxonomy snapshot
    pub fn taxonomy(&self) -> Arc<Taxonomy> {
        self.taxonomy.snapshot()
    }

    pub fn taxonomy_manager(&self) -> &Arc<TaxonomyManager> {
        &self.taxonomy
    }

    pub fn settings(&self) -> &ClassifierSettings {
        &self.settings
    }

    /// Classify text into a taxonomy category or `"unclassified"`
    pub async fn classify(&self, text: &str) -> ClassificationResult {
        self.classify_detailed(text).await.into()
    }

    /// Classify text, reporting which path produced the category
    pub async fn classify_detailed(&self, text: &str) -> ClassificationOutcome {
        if text.trim().is_empty() {
            return ClassificationOutcome::empty();
        }

        let taxonomy = self.taxonomy.snapshot();

        if let Some(outcome) = self.try_semantic(text, &taxonomy).await {
            return outcome;
        }

        ClassificationOutcome {
            category: self.keywords.classify(text, &taxonomy).category,
            method: ClassificationMethod::Keyword,
            confidence: None,
        }
    }

    /// Keyword path only, without touching the semantic backend
    pub fn classify_keywords(&self, text: &str) -> ClassificationResult {
        self.keywords.classify(text, &self.taxonomy.snapshot())
    }

    /// Extract entities and severity
    pub fn extract_key_info(&self, text: &str) -> ExtractedInfo {
        self.extractor
            .extract(text)
            .with_severity(self.severity.score(text))
    }

    /// Full structured record for one complaint text
    pub async fn process(&self, text: &str) -> ComplaintRecord {
        let classification = self.classify(text).await;
        ComplaintRecord::new(classification, self.extract_key_info(text))
    }

    /// Like [`process`](Self::process), for raw bytes
    ///
    /// Non-UTF-8 input is rejected up front rather than partially classified.
    pub async fn process_bytes(&self, bytes: &[u8]) -> Result<ComplaintRecord> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            TextProcessingError::InvalidInput(format!("complaint text is not valid UTF-8: {}", e))
        })?;
        Ok(self.process(text).await)
    }

    async fn try_semantic(&self, text: &str, taxonomy: &Taxonomy) -> Option<ClassificationOutcome> {
        if !self.settings.semantic_enabled || !self.semantic.is_available() {
            return None;
        }

        let labels = taxonomy.names();
        let timeout_ms = self.settings.semantic_timeout_ms;
        let result = match tokio::time::timeout(
            Duration::from_millis(timeout_ms),
            self.semantic.classify(text, &labels),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout(timeout_ms)),
        };

        match result {
            Ok(label) if !taxonomy.contains(&label.label) => {
                tracing::warn!(
                    classifier = self.semantic.name(),
                    label = %label.label,
                    "Semantic label not in taxonomy, falling back to keywords"
                );
                None
            }
            // NaN confidence fails this comparison and falls back too
            Ok(label) if !(label.confidence >= self.settings.min_confidence) => {
                tracing::debug!(
                    classifier = self.semantic.name(),
                    label = %label.label,
                    confidence = label.confidence,
                    min_confidence = self.settings.min_confidence,
                    "Low semantic confidence, falling back to keywords"
                );
                None
            }
            Ok(label) => Some(ClassificationOutcome {
                category: label.label,
                method: ClassificationMethod::Semantic,
                confidence: Some(label.confidence),
            }),
            Err(e) => {
                tracing::warn!(
                    classifier = self.semantic.name(),
                    error = %e,
                    "Semantic classification failed, falling back to keywords"
                );
                None
            }
        }
    }
}

impl Default for ComplaintClassifier {
    fn default() -> Self {
        Self::new(Taxonomy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::StaticSemanticClassifier;
    use async_trait::async_trait;
    use complaint_triage_core::{SemanticLabel, Severity};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn logistics_taxonomy() -> Taxonomy {
        Taxonomy::new([
            ("物流延迟", vec!["延迟", "物流"]),
            ("商品损坏", vec!["损坏", "破损"]),
        ])
        .unwrap()
    }

    fn semantic_settings() -> ClassifierSettings {
        ClassifierSettings {
            semantic_enabled: true,
            semantic_timeout_ms: 100,
            min_confidence: 0.5,
        }
    }

    struct FailingClassifier;

    #[async_trait]
    impl SemanticClassifier for FailingClassifier {
        async fn classify(&self, _text: &str, _labels: &[String]) -> complaint_triage_core::Result<SemanticLabel> {
            Err(Error::Semantic("model crashed".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct SlowClassifier;

    #[async_trait]
    impl SemanticClassifier for SlowClassifier {
        async fn classify(&self, _text: &str, labels: &[String]) -> complaint_triage_core::Result<SemanticLabel> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(SemanticLabel::new(labels[1].clone(), 1.0))
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    #[derive(Default)]
    struct CountingClassifier {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SemanticClassifier for CountingClassifier {
        async fn classify(&self, _text: &str, labels: &[String]) -> complaint_triage_core::Result<SemanticLabel> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(SemanticLabel::new(labels[0].clone(), 0.9))
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    #[tokio::test]
    async fn test_keyword_only_by_default() {
        let engine = ComplaintClassifier::new(logistics_taxonomy());
        let outcome = engine.classify_detailed("物流延迟太严重了").await;
        assert_eq!(outcome.category, "物流延迟");
        assert_eq!(outcome.method, ClassificationMethod::Keyword);
        assert_eq!(outcome.confidence, None);
    }

    #[tokio::test]
    async fn test_semantic_wins_when_confident() {
        let engine = ComplaintClassifier::new(logistics_taxonomy())
            .with_semantic(Arc::new(StaticSemanticClassifier::new("商品损坏", 0.8)))
            .with_settings(semantic_settings());

        let outcome = engine.classify_detailed("物流延迟太严重了").await;
        assert_eq!(outcome.category, "商品损坏");
        assert_eq!(outcome.method, ClassificationMethod::Semantic);
        assert_eq!(outcome.confidence, Some(0.8));
    }

    #[tokio::test]
    async fn test_semantic_ignored_when_disabled() {
        let engine = ComplaintClassifier::new(logistics_taxonomy())
            .with_semantic(Arc::new(StaticSemanticClassifier::new("商品损坏", 0.8)));
        assert_eq!(engine.classify("物流延迟太严重了").await.category, "物流延迟");
    }

    #[tokio::test]
    async fn test_semantic_error_falls_back() {
        let engine = ComplaintClassifier::new(logistics_taxonomy())
            .with_semantic(Arc::new(FailingClassifier))
            .with_settings(semantic_settings());

        let outcome = engine.classify_detailed("物流延迟太严重了").await;
        assert_eq!(outcome.category, "物流延迟");
        assert_eq!(outcome.method, ClassificationMethod::Keyword);
    }

    #[tokio::test(start_paused = true)]
    async fn test_semantic_timeout_falls_back() {
        let engine = ComplaintClassifier::new(logistics_taxonomy())
            .with_semantic(Arc::new(SlowClassifier))
            .with_settings(semantic_settings());

        let outcome = engine.classify_detailed("物流延迟太严重了").await;
        assert_eq!(outcome.category, "物流延迟");
        assert_eq!(outcome.method, ClassificationMethod::Keyword);
    }

    #[tokio::test]
    async fn test_low_confidence_falls_back() {
        let engine = ComplaintClassifier::new(logistics_taxonomy())
            .with_semantic(Arc::new(StaticSemanticClassifier::new("商品损坏", 0.2)))
            .with_settings(semantic_settings());
        assert_eq!(engine.classify("物流延迟太严重了").await.category, "物流延迟");

        let engine = ComplaintClassifier::new(logistics_taxonomy())
            .with_semantic(Arc::new(StaticSemanticClassifier::new("商品损坏", f32::NAN)))
            .with_settings(semantic_settings());
        assert_eq!(engine.classify("物流延迟太严重了").await.category, "物流延迟");
    }

    #[tokio::test]
    async fn test_unknown_label_falls_back() {
        let engine = ComplaintClassifier::new(logistics_taxonomy())
            .with_semantic(Arc::new(StaticSemanticClassifier::new("天气", 0.99)))
            .with_settings(semantic_settings());
        assert_eq!(engine.classify("物流延迟太严重了").await.category, "物流延迟");
    }

    #[tokio::test]
    async fn test_empty_text_skips_semantic() {
        let semantic = Arc::new(CountingClassifier::default());
        let engine = ComplaintClassifier::new(logistics_taxonomy())
            .with_semantic(semantic.clone())
            .with_settings(semantic_settings());

        let outcome = engine.classify_detailed("   ").await;
        assert_eq!(outcome, ClassificationOutcome::empty());
        assert_eq!(semantic.calls.load(Ordering::SeqCst), 0);

        engine.classify("损坏了").await;
        assert_eq!(semantic.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_text_record() {
        let record = ComplaintClassifier::default().process("").await;
        assert_eq!(record.category, UNCLASSIFIED);
        assert_eq!(record.info, ExtractedInfo::default());
        assert_eq!(record.info.severity, Severity::Medium);
    }

    #[tokio::test]
    async fn test_process_is_idempotent() {
        let engine = ComplaintClassifier::default();
        let text = "紧急！订单 ORD-20240115 的 \"小米手环\" 物流延迟，花费 199元，2024/01/15 下单";

        let first = serde_json::to_string(&engine.process(text).await).unwrap();
        let second = serde_json::to_string(&engine.process(text).await).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_process_bytes_rejects_invalid_utf8() {
        let engine = ComplaintClassifier::default();
        let err = engine.process_bytes(&[0xff, 0xfe, 0x00]).await.unwrap_err();
        assert!(matches!(err, TextProcessingError::InvalidInput(_)));

        let record = engine.process_bytes("包裹破损".as_bytes()).await.unwrap();
        assert_eq!(record.category, "商品损坏");
    }

    #[tokio::test]
    async fn test_reload_is_visible_between_calls() {
        let engine = ComplaintClassifier::new(logistics_taxonomy());
        assert_eq!(engine.classify("系统崩溃").await.category, UNCLASSIFIED);

        engine
            .taxonomy_manager()
            .update(Taxonomy::new([("系统故障", vec!["崩溃"])]).unwrap());
        assert_eq!(engine.classify("系统崩溃").await.category, "系统故障");
    }

    #[test]
    fn test_from_settings_defaults() {
        let engine = ComplaintClassifier::from_settings(&Settings::default(), None).unwrap();
        assert_eq!(engine.taxonomy().len(), 8);
        assert!(!engine.settings().semantic_enabled);
    }

    #[test]
    fn test_from_settings_rejects_missing_taxonomy() {
        let settings = Settings {
            taxonomy_path: Some("/nonexistent/taxonomy.json".into()),
            ..Default::default()
        };
        assert!(matches!(
            ComplaintClassifier::from_settings(&settings, None),
            Err(TextProcessingError::Config(_))
        ));
    }
}
