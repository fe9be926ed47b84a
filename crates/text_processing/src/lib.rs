//! Complaint classification and information extraction
//!
//! This crate turns free-text complaints into structured records:
//! - **Keyword Classification**: case-insensitive keyword counting against a taxonomy
//! - **Semantic Classification**: optional injected model, with timeout and fallback
//! - **Entity Extraction**: product name, monetary amount, incident date
//! - **Severity Scoring**: high/medium/low keyword buckets
//! - **Pipeline**: batch processing with an injected sentiment analyzer
//!
//! # Example
//!
//! ```
//! use complaint_triage_core::Severity;
//! use complaint_triage_text_processing::ComplaintClassifier;
//!
//! let engine = ComplaintClassifier::default();
//! let text = "快递延迟一周，要求退款 $59.90";
//!
//! assert_eq!(engine.classify_keywords(text).category, "物流延迟");
//!
//! let info = engine.extract_key_info(text);
//! assert_eq!(info.amount, Some(59.9));
//! assert_eq!(info.severity, Severity::High);
//! ```

pub mod classifier;
pub mod engine;
pub mod entities;
pub mod semantic;
pub mod sentiment;
pub mod severity;
pub mod tokenize;

mod error;
mod pipeline;

pub use error::{Result, TextProcessingError};
pub use pipeline::ComplaintPipeline;

pub use classifier::{CategoryScore, KeywordClassifier, KeywordScores};
pub use engine::{ClassificationMethod, ClassificationOutcome, ComplaintClassifier};
pub use entities::{EntityExtractor, ExtractedEntities};
pub use semantic::{create_semantic_classifier, NoopSemanticClassifier, StaticSemanticClassifier};
pub use sentiment::{score_sentiment, NeutralSentimentAnalyzer};
pub use severity::{SeverityCounts, SeverityScorer};
pub use tokenize::tokenize;
