//! Complaint records and classification output types
//!
//! These are the structures consumed by downstream persistence and reporting.
//! Optional fields are omitted from the serialized form when absent, never
//! written as `null`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category sentinel used when no taxonomy category matches
pub const UNCLASSIFIED: &str = "unclassified";

/// Complaint severity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    #[default]
    Medium,
    Low,
}

impl Severity {
    /// Tie-break priority order: earlier entries win equal counts
    pub const PRIORITY: [Severity; 3] = [Severity::High, Severity::Medium, Severity::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of category classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Taxonomy category name or [`UNCLASSIFIED`]
    pub category: String,
}

impl ClassificationResult {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
        }
    }

    pub fn unclassified() -> Self {
        Self::new(UNCLASSIFIED)
    }

    pub fn is_unclassified(&self) -> bool {
        self.category == UNCLASSIFIED
    }
}

/// Key information extracted from complaint text
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtractedInfo {
    /// Product name (first non-empty quoted span)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    /// Monetary amount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// Incident date, verbatim as written in the text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident_date: Option<String>,
    /// Severity tier (always present)
    #[serde(default)]
    pub severity: Severity,
}

impl ExtractedInfo {
    /// True when no entity field was extracted
    pub fn has_no_entities(&self) -> bool {
        self.product_name.is_none() && self.amount.is_none() && self.incident_date.is_none()
    }
}

/// Structured record produced for a single complaint text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplaintRecord {
    pub category: String,
    #[serde(flatten)]
    pub info: ExtractedInfo,
}

impl ComplaintRecord {
    pub fn new(classification: ClassificationResult, info: ExtractedInfo) -> Self {
        Self {
            category: classification.category,
            info,
        }
    }
}

/// Sentiment label derived from a sentiment score in [-1, 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl SentimentLabel {
    /// Scores above this are positive, below its negation negative
    pub const THRESHOLD: f32 = 0.2;

    pub fn from_score(score: f32) -> Self {
        if score > Self::THRESHOLD {
            Self::Positive
        } else if score < -Self::THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

/// A complaint as supplied by the upstream mailbox collaborator
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IncomingComplaint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Complaint body; the only field the classification engine reads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Received date as formatted by the mailbox collaborator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,
}

impl IncomingComplaint {
    pub fn from_content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    /// Complaint body, empty when missing
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}

/// Incoming complaint merged with classification, sentiment and extracted info
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedComplaint {
    #[serde(flatten)]
    pub complaint: IncomingComplaint,
    pub complaint_type: String,
    pub sentiment_score: f32,
    pub sentiment_label: SentimentLabel,
    #[serde(flatten)]
    pub info: ExtractedInfo,
    pub processed_at: DateTime<Utc>,
}
