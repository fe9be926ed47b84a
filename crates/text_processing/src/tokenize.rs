//! Complaint text tokenizer
//!
//! Produces lowercase alphabetic tokens with English stop words removed.
//! Keyword classification works on case-folded substrings, not tokens; the
//! token list is reported for diagnostics and semantic backends.

use unicode_segmentation::UnicodeSegmentation;

const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "did", "do", "does", "doing", "down", "during", "each", "few", "for", "from",
    "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself", "him",
    "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "me",
    "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once", "only",
    "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she", "should",
    "so", "some", "such", "than", "that", "the", "their", "theirs", "them", "themselves", "then",
    "there", "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why",
    "will", "with", "you", "your", "yours", "yourself", "yourselves",
];

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Tokenize on Unicode word boundaries
///
/// Falls back to whitespace splitting when segmentation yields nothing for
/// non-blank text (e.g. text made only of symbols).
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();

    let tokens: Vec<String> = lower
        .unicode_words()
        .filter(|word| word.chars().all(char::is_alphabetic))
        .filter(|word| !is_stop_word(word))
        .map(str::to_string)
        .collect();

    if tokens.is_empty() && !lower.trim().is_empty() {
        return lower.split_whitespace().map(str::to_string).collect();
    }

    tokens
}
