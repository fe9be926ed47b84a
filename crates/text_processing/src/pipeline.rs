//! Complaint processing pipeline
//!
//! Runs each incoming complaint through the classifier and the sentiment
//! collaborator and merges the results into a [`ProcessedComplaint`].

use chrono::Utc;
use complaint_triage_core::{IncomingComplaint, ProcessedComplaint, SentimentAnalyzer};
use futures::future::join_all;
use std::sync::Arc;

use crate::engine::ComplaintClassifier;
use crate::sentiment::{score_sentiment, NeutralSentimentAnalyzer};

/// Classification plus sentiment for batches of complaints
pub struct ComplaintPipeline {
    classifier: Arc<ComplaintClassifier>,
    sentiment: Arc<dyn SentimentAnalyzer>,
}

impl ComplaintPipeline {
    /// Pipeline with the neutral sentiment analyzer
    pub fn new(classifier: Arc<ComplaintClassifier>) -> Self {
        Self::with_sentiment(classifier, Arc::new(NeutralSentimentAnalyzer))
    }

    pub fn with_sentiment(
        classifier: Arc<ComplaintClassifier>,
        sentiment: Arc<dyn SentimentAnalyzer>,
    ) -> Self {
        Self {
            classifier,
            sentiment,
        }
    }

    pub fn classifier(&self) -> &Arc<ComplaintClassifier> {
        &self.classifier
    }

    /// Process one complaint
    ///
    /// A complaint without content is processed as empty text.
    pub async fn process(&self, complaint: IncomingComplaint) -> ProcessedComplaint {
        let text = complaint.text();

        let classification = self.classifier.classify(text).await;
        let (sentiment_score, sentiment_label) = score_sentiment(self.sentiment.as_ref(), text).await;
        let info = self.classifier.extract_key_info(text);

        tracing::info!(
            id = complaint.id.as_deref().unwrap_or("-"),
            subject = complaint.subject.as_deref().unwrap_or("-"),
            category = %classification.category,
            severity = %info.severity,
            sentiment = ?sentiment_label,
            "Processed complaint"
        );

        ProcessedComplaint {
            complaint,
            complaint_type: classification.category,
            sentiment_score,
            sentiment_label,
            info,
            processed_at: Utc::now(),
        }
    }

    /// Process complaints concurrently; output order matches input order
    pub async fn process_batch(&self, complaints: Vec<IncomingComplaint>) -> Vec<ProcessedComplaint> {
        let total = complaints.len();
        let processed = join_all(complaints.into_iter().map(|c| self.process(c))).await;
        tracing::info!(total, "Processed complaint batch");
        processed
    }
}
