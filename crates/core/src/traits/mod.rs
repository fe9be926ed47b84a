//! Collaborator traits for the complaint triage engine
//!
//! External capabilities are injected through these traits so the engine
//! can run with mocks, no-op implementations, or real model backends.
//!
//! ```text
//! Classification:
//!   - SemanticClassifier: Optional model-backed category labeling
//!
//! Downstream enrichment:
//!   - SentimentAnalyzer: Sentiment score in [-1, 1]
//! ```

mod semantic;
mod sentiment;

pub use semantic::{SemanticClassifier, SemanticLabel};
pub use sentiment::SentimentAnalyzer;
