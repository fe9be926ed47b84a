//! Severity scoring
//!
//! Counts, per tier, how many of the tier's keywords appear in the text
//! (case-insensitive, each keyword at most once). The tier with the highest
//! count wins, with ties resolved high > medium > low. A text matching no
//! keyword at all is `medium`.

use complaint_triage_config::{fold_case, SeverityBuckets};
use complaint_triage_core::Severity;
use serde::{Deserialize, Serialize};

/// Keyword hit counts per tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityCounts {
    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }

    /// Winning tier for these counts
    pub fn severity(&self) -> Severity {
        let mut best = Severity::Medium;
        let mut best_count = 0;
        for tier in Severity::PRIORITY {
            let count = self.get(tier);
            if count > best_count {
                best = tier;
                best_count = count;
            }
        }
        best
    }
}

/// Keyword-bucket severity scorer
#[derive(Debug, Clone, Default)]
pub struct SeverityScorer {
    buckets: SeverityBuckets,
}

impl SeverityScorer {
    pub fn new(buckets: SeverityBuckets) -> Self {
        Self { buckets }
    }

    pub fn buckets(&self) -> &SeverityBuckets {
        &self.buckets
    }

    /// Count keyword hits for every tier
    pub fn count(&self, text: &str) -> SeverityCounts {
        let folded = fold_case(text);
        let hits = |tier: Severity| {
            self.buckets
                .keywords(tier)
                .iter()
                .filter(|keyword| folded.contains(keyword.as_str()))
                .count()
        };

        SeverityCounts {
            high: hits(Severity::High),
            medium: hits(Severity::Medium),
            low: hits(Severity::Low),
        }
    }

    pub fn score(&self, text: &str) -> Severity {
        self.count(text).severity()
    }
}
