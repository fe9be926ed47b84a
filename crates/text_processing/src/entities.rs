//! Complaint entity extraction
//!
//! Extracts three independent fields from complaint text:
//! - Product name: first quoted span (all-uppercase tokens are consumed but
//!   never reported)
//! - Monetary amount: currency symbol prefix or currency unit suffix
//! - Incident date: year-first, day-first with 4-digit year, or day-first
//!   with 2-digit year, kept verbatim
//!
//! Each family takes the leftmost match in the text, with the declared
//! alternation order breaking ties at the same position. This is a positional
//! heuristic: the first amount mentioned is taken even when a later one is
//! the price actually complained about.
//!
//! # Example
//!
//! ```
//! use complaint_triage_text_processing::EntityExtractor;
//!
//! let extractor = EntityExtractor::new();
//! let entities = extractor.extract("订单号 ORD-12345 购买 \"iPhone 13\" 花费 $99.99 日期 2024-01-15");
//!
//! assert_eq!(entities.product_name.as_deref(), Some("iPhone 13"));
//! assert_eq!(entities.amount, Some(99.99));
//! assert_eq!(entities.incident_date.as_deref(), Some("2024-01-15"));
//! ```

use complaint_triage_core::{ExtractedInfo, Severity};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Entities extracted from text, before severity scoring
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtractedEntities {
    pub product_name: Option<String>,
    pub amount: Option<f64>,
    pub incident_date: Option<String>,
}

impl ExtractedEntities {
    pub fn is_empty(&self) -> bool {
        self.product_name.is_none() && self.amount.is_none() && self.incident_date.is_none()
    }

    /// Attach a severity to produce the downstream record fields
    pub fn with_severity(self, severity: Severity) -> ExtractedInfo {
        ExtractedInfo {
            product_name: self.product_name,
            amount: self.amount,
            incident_date: self.incident_date,
            severity,
        }
    }
}

// Compiled regex patterns. Alternation order is significant.

// Quoted spans capture (double, curly double, single, curly single); the bare
// uppercase alternative has no capture group.
static PRODUCT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""([^"]+)"|“([^”]+)”|'([^']+)'|‘([^’]+)’|[A-Z]{2,}"#).unwrap()
});

static AMOUNT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[$¥￥]\s*(\d+(?:\.\d{2})?)|(\d+(?:\.\d{2})?)\s*美元|(\d+(?:\.\d{2})?)\s*元")
        .unwrap()
});

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\d{4}[-/]\d{1,2}[-/]\d{1,2}|\d{1,2}[-/]\d{1,2}[-/]\d{4}|\d{1,2}[-/]\d{1,2}[-/]\d{2}",
    )
    .unwrap()
});

static DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d$").unwrap());

fn is_decimal_digit(c: char) -> bool {
    DIGIT.is_match(c.encode_utf8(&mut [0; 4]))
}

/// Value of a Unicode decimal digit
///
/// Decimal digits come in runs of whole ten-digit sets, each starting at
/// zero, so the value is the distance from the start of the run modulo ten.
fn decimal_value(c: char) -> Option<u32> {
    if let Some(d) = c.to_digit(10) {
        return Some(d);
    }
    if !is_decimal_digit(c) {
        return None;
    }
    let mut start = c as u32;
    while let Some(prev) = start.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        start -= 1;
    }
    Some((c as u32 - start) % 10)
}

/// Map non-ASCII decimal digits (such as full-width `１２９９`) to ASCII
///
/// `\d` matches any Unicode decimal digit, but only ASCII digits parse.
fn fold_digits(raw: &str) -> String {
    raw.chars()
        .map(|c| match decimal_value(c) {
            Some(d) if !c.is_ascii() => char::from_digit(d, 10).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// Pattern-based entity extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityExtractor;

impl EntityExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract all entities from text
    pub fn extract(&self, text: &str) -> ExtractedEntities {
        ExtractedEntities {
            product_name: self.extract_product(text),
            amount: self.extract_amount(text),
            incident_date: self.extract_date(text),
        }
    }

    /// Extract the product name
    ///
    /// The first non-empty quoted span in the text wins. Uppercase tokens
    /// such as `ORD` in an order number match the pattern but carry no
    /// capture, so they never become the product.
    pub fn extract_product(&self, text: &str) -> Option<String> {
        PRODUCT_PATTERN
            .captures_iter(text)
            .flat_map(|caps| {
                caps.iter()
                    .skip(1)
                    .flatten()
                    .map(|m| m.as_str())
                    .find(|s| !s.is_empty())
            })
            .next()
            .map(str::to_string)
    }

    /// Extract the first monetary amount
    ///
    /// Digits from any script are folded to ASCII before parsing. A capture
    /// that still does not parse to a finite value leaves the amount unset.
    pub fn extract_amount(&self, text: &str) -> Option<f64> {
        let caps = AMOUNT_PATTERN.captures(text)?;
        let raw = caps
            .iter()
            .skip(1)
            .flatten()
            .map(|m| m.as_str())
            .find(|s| !s.is_empty())?;

        match fold_digits(raw).parse::<f64>() {
            Ok(value) if value.is_finite() => Some(value),
            _ => {
                tracing::debug!(raw, "Amount capture is not a decimal, skipping");
                None
            }
        }
    }

    /// Extract the first date-shaped substring, verbatim
    pub fn extract_date(&self, text: &str) -> Option<String> {
        DATE_PATTERN.find(text).map(|m| m.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_all_entities() {
        let extractor = EntityExtractor::new();
        let entities =
            extractor.extract("订单号 ORD-12345 购买 \"iPhone 13\" 花费 $99.99 日期 2024-01-15");

        assert_eq!(entities.product_name, Some("iPhone 13".to_string()));
        assert_eq!(entities.amount, Some(99.99));
        assert_eq!(entities.incident_date, Some("2024-01-15".to_string()));
    }

    #[test]
    fn test_empty_text() {
        let extractor = EntityExtractor::new();
        assert!(extractor.extract("").is_empty());
    }

    #[test]
    fn test_product_first_quoted_span_wins() {
        let extractor = EntityExtractor::new();
        assert_eq!(
            extractor.extract_product("I bought 'AirPods' and \"iPad\""),
            Some("AirPods".to_string())
        );
        assert_eq!(
            extractor.extract_product("收到的“华为 P50”屏幕碎了"),
            Some("华为 P50".to_string())
        );
    }

    #[test]
    fn test_product_uppercase_tokens_never_reported() {
        let extractor = EntityExtractor::new();
        assert_eq!(extractor.extract_product("My new TV arrived broken"), None);
        assert_eq!(
            extractor.extract_product("我收到的iPhone 13已经损坏了，订单号ORD-12345678，价格2999.00元。"),
            None
        );
        // Quoted span after an uppercase token
        assert_eq!(
            extractor.extract_product("ORDER 42: the \"Nike运动鞋\" are fake"),
            Some("Nike运动鞋".to_string())
        );
        assert_eq!(extractor.extract_product("nothing here"), None);
        assert_eq!(extractor.extract_product("\"\" empty quotes"), None);
    }

    #[test]
    fn test_amount_symbol_prefix() {
        let extractor = EntityExtractor::new();
        assert_eq!(extractor.extract_amount("charged $ 250"), Some(250.0));
        assert_eq!(extractor.extract_amount("价格￥1299.50"), Some(1299.5));
    }

    #[test]
    fn test_amount_unit_suffix() {
        let extractor = EntityExtractor::new();
        assert_eq!(extractor.extract_amount("价格2999元，太贵了"), Some(2999.0));
        assert_eq!(extractor.extract_amount("退我 45.50 美元"), Some(45.5));
    }

    #[test]
    fn test_amount_leftmost_match() {
        let extractor = EntityExtractor::new();
        assert_eq!(extractor.extract_amount("先付了100元，又付了$20"), Some(100.0));
        assert_eq!(extractor.extract_amount("$20 first, then 100元"), Some(20.0));
    }

    #[test]
    fn test_amount_ignores_bare_numbers() {
        let extractor = EntityExtractor::new();
        assert_eq!(extractor.extract_amount("订单号 ORD-12345678"), None);
    }

    #[test]
    fn test_amount_full_width_digits() {
        let extractor = EntityExtractor::new();
        assert_eq!(extractor.extract_amount("价格１２９９元，太贵了"), Some(1299.0));
        assert_eq!(extractor.extract_amount("￥３５.５０"), Some(35.5));
    }

    #[test]
    fn test_amount_other_decimal_scripts() {
        let extractor = EntityExtractor::new();
        assert_eq!(extractor.extract_amount("花费 ٩٩元"), Some(99.0));
        assert_eq!(extractor.extract_amount("$ ४२"), Some(42.0));
    }

    #[test]
    fn test_amount_overflowing_capture_is_absent() {
        let extractor = EntityExtractor::new();
        let text = format!("赔偿{}元", "9".repeat(400));
        assert_eq!(extractor.extract_amount(&text), None);
    }

    #[test]
    fn test_fold_digits() {
        assert_eq!(fold_digits("１２９９"), "1299");
        assert_eq!(fold_digits("３５.５０"), "35.50");
        assert_eq!(fold_digits("𝟗𝟗"), "99");
        assert_eq!(fold_digits("12.50"), "12.50");
    }

    #[test]
    fn test_date_shapes() {
        let extractor = EntityExtractor::new();
        assert_eq!(extractor.extract_date("on 2024/1/5 it broke"), Some("2024/1/5".to_string()));
        assert_eq!(extractor.extract_date("on 15-01-2024 it broke"), Some("15-01-2024".to_string()));
        assert_eq!(extractor.extract_date("on 15/01/24 it broke"), Some("15/01/24".to_string()));
        assert_eq!(extractor.extract_date("no date"), None);
    }

    #[test]
    fn test_date_not_validated() {
        let extractor = EntityExtractor::new();
        assert_eq!(extractor.extract_date("2024-13-45"), Some("2024-13-45".to_string()));
    }

    #[test]
    fn test_date_first_in_text() {
        let extractor = EntityExtractor::new();
        assert_eq!(
            extractor.extract_date("ordered 01/02/23, delivered 2023-03-01"),
            Some("01/02/23".to_string())
        );
    }

    #[test]
    fn test_fields_independent() {
        let extractor = EntityExtractor::new();
        let entities = extractor.extract("only a date 2024-05-06 here");
        assert_eq!(entities.product_name, None);
        assert_eq!(entities.amount, None);
        assert_eq!(entities.incident_date, Some("2024-05-06".to_string()));
    }

    #[test]
    fn test_with_severity() {
        let info = ExtractedEntities::default().with_severity(Severity::Low);
        assert_eq!(info.severity, Severity::Low);
        assert!(info.has_no_entities());
    }
}
