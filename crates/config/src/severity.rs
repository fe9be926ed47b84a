//! Severity keyword buckets

use complaint_triage_core::Severity;
use serde::{Deserialize, Serialize};

use crate::{taxonomy::fold_case, ConfigError};

/// Keyword sets for the three severity tiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBuckets", into = "RawBuckets")]
pub struct SeverityBuckets {
    high: Vec<String>,
    medium: Vec<String>,
    low: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawBuckets {
    #[serde(default)]
    high: Vec<String>,
    #[serde(default)]
    medium: Vec<String>,
    #[serde(default)]
    low: Vec<String>,
}

impl SeverityBuckets {
    pub fn new<S: Into<String>>(
        high: impl IntoIterator<Item = S>,
        medium: impl IntoIterator<Item = S>,
        low: impl IntoIterator<Item = S>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            high: fold_bucket("high", high)?,
            medium: fold_bucket("medium", medium)?,
            low: fold_bucket("low", low)?,
        })
    }

    /// Case-folded keywords of one tier
    pub fn keywords(&self, severity: Severity) -> &[String] {
        match severity {
            Severity::High => &self.high,
            Severity::Medium => &self.medium,
            Severity::Low => &self.low,
        }
    }
}

fn fold_bucket<S: Into<String>>(
    tier: &str,
    keywords: impl IntoIterator<Item = S>,
) -> Result<Vec<String>, ConfigError> {
    let mut folded: Vec<String> = Vec::new();
    for keyword in keywords {
        let keyword: String = keyword.into();
        if keyword.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: format!("severity.{}", tier),
                message: "keywords must not be blank".to_string(),
            });
        }
        let key = fold_case(&keyword);
        if !folded.contains(&key) {
            folded.push(key);
        }
    }
    Ok(folded)
}

impl Default for SeverityBuckets {
    fn default() -> Self {
        let high = [
            "紧急", "立即", "非常不满", "极其", "要求", "投诉", "退款", "起诉", "举报", "丢失",
        ];
        let medium = ["不满", "问题", "失望", "退换", "损坏", "延迟", "错误"];
        let low = ["咨询", "建议", "希望", "改进", "询问", "请问"];

        Self {
            high: high.iter().map(|k| fold_case(k)).collect(),
            medium: medium.iter().map(|k| fold_case(k)).collect(),
            low: low.iter().map(|k| fold_case(k)).collect(),
        }
    }
}

impl TryFrom<RawBuckets> for SeverityBuckets {
    type Error = ConfigError;

    fn try_from(raw: RawBuckets) -> Result<Self, Self::Error> {
        Self::new(raw.high, raw.medium, raw.low)
    }
}

impl From<SeverityBuckets> for RawBuckets {
    fn from(buckets: SeverityBuckets) -> Self {
        Self {
            high: buckets.high,
            medium: buckets.medium,
            low: buckets.low,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_buckets() {
        let buckets = SeverityBuckets::default();
        assert_eq!(buckets.keywords(Severity::High).len(), 10);
        assert_eq!(buckets.keywords(Severity::Medium).len(), 7);
        assert_eq!(buckets.keywords(Severity::Low).len(), 6);
        assert!(buckets.keywords(Severity::High).contains(&"紧急".to_string()));
    }

    #[test]
    fn test_custom_buckets_are_folded() {
        let buckets = SeverityBuckets::new(["URGENT", "urgent"], ["Broken"], ["Question"]).unwrap();
        assert_eq!(buckets.keywords(Severity::High), &["urgent".to_string()]);
        assert_eq!(buckets.keywords(Severity::Medium), &["broken".to_string()]);
    }

    #[test]
    fn test_blank_keyword_rejected() {
        let err = SeverityBuckets::new(["ok"], [" "], ["fine"]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_deserialize_validates() {
        let buckets: SeverityBuckets =
            serde_json::from_str(r#"{"high": ["Now"], "low": ["maybe"]}"#).unwrap();
        assert_eq!(buckets.keywords(Severity::High), &["now".to_string()]);
        assert!(buckets.keywords(Severity::Medium).is_empty());

        assert!(serde_json::from_str::<SeverityBuckets>(r#"{"high": [""]}"#).is_err());
    }
}
