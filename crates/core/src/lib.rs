//! Core traits and types for complaint triage
//!
//! This crate provides foundational types used across all other crates:
//! - Complaint records and classification output (`ComplaintRecord`, `ExtractedInfo`)
//! - Severity and sentiment labels
//! - Collaborator traits (semantic classifier, sentiment analyzer)
//! - Error types

pub mod complaint;
pub mod error;
pub mod traits;

pub use complaint::{
    ClassificationResult, ComplaintRecord, ExtractedInfo, IncomingComplaint, ProcessedComplaint,
    SentimentLabel, Severity, UNCLASSIFIED,
};
pub use error::{Error, Result};
pub use traits::{SemanticClassifier, SemanticLabel, SentimentAnalyzer};
