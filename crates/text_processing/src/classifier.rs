//! Keyword category classifier
//!
//! Scores text against a [`Taxonomy`] by counting, per category, how many of
//! its keywords occur as a case-insensitive substring of the text. Each
//! keyword counts at most once no matter how often it appears.
//!
//! The category with the highest count wins. Equal counts go to the category
//! listed first in the taxonomy. A zero maximum yields `"unclassified"`.
//!
//! # Example
//!
//! ```
//! use complaint_triage_config::Taxonomy;
//! use complaint_triage_text_processing::KeywordClassifier;
//!
//! let taxonomy = Taxonomy::new([
//!     ("物流延迟", vec!["延迟", "物流"]),
//!     ("商品损坏", vec!["损坏", "破损"]),
//! ]).unwrap();
//!
//! let result = KeywordClassifier::new().classify("物流延迟太严重了", &taxonomy);
//! assert_eq!(result.category, "物流延迟");
//! ```

use complaint_triage_config::{fold_case, Taxonomy};
use complaint_triage_core::ClassificationResult;
use serde::{Deserialize, Serialize};

use crate::tokenize::tokenize;

/// Per-category match count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: String,
    /// Distinct keywords found in the text
    pub count: usize,
    /// The matched keywords, case-folded
    pub matched: Vec<String>,
}

/// Keyword scoring details for one text
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeywordScores {
    /// One entry per category, in taxonomy order
    pub scores: Vec<CategoryScore>,
    /// Tokens of the text (diagnostic only)
    pub tokens: Vec<String>,
}

impl KeywordScores {
    /// Highest-scoring category; ties go to the earliest entry
    pub fn best(&self) -> Option<&CategoryScore> {
        let mut best: Option<&CategoryScore> = None;
        for score in &self.scores {
            if best.map_or(true, |b| score.count > b.count) {
                best = Some(score);
            }
        }
        best.filter(|b| b.count > 0)
    }

    pub fn max_count(&self) -> usize {
        self.scores.iter().map(|s| s.count).max().unwrap_or(0)
    }
}

/// Case-folded substring keyword classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Score every category of `taxonomy` against `text`
    pub fn score(&self, text: &str, taxonomy: &Taxonomy) -> KeywordScores {
        if text.trim().is_empty() {
            return KeywordScores::default();
        }

        let folded = fold_case(text);
        let scores = taxonomy
            .categories()
            .iter()
            .map(|category| {
                let matched: Vec<String> = category
                    .folded_keywords()
                    .iter()
                    .filter(|keyword| folded.contains(keyword.as_str()))
                    .cloned()
                    .collect();
                CategoryScore {
                    category: category.name().to_string(),
                    count: matched.len(),
                    matched,
                }
            })
            .collect();

        KeywordScores {
            scores,
            tokens: tokenize(text),
        }
    }

    /// Best-matching category, or unclassified
    pub fn classify(&self, text: &str, taxonomy: &Taxonomy) -> ClassificationResult {
        if text.trim().is_empty() {
            return ClassificationResult::unclassified();
        }

        let scores = self.score(text, taxonomy);
        match scores.best() {
            Some(best) => {
                tracing::trace!(
                    category = %best.category,
                    count = best.count,
                    matched = ?best.matched,
                    "Keyword classification"
                );
                ClassificationResult::new(best.category.clone())
            }
            None => ClassificationResult::unclassified(),
        }
    }
}
