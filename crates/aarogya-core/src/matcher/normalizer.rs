//! Symptom query normalizer.
//!
//! Handles:
//! - Case folding (FEVER → fever)
//! - Comma stripping ("fever, cough" → "fever cough")
//! - Whitespace tokenization (runs of any whitespace split tokens)

use std::collections::BTreeSet;

/// Normalized, order-free set of query words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    tokens: BTreeSet<String>,
}

impl TokenSet {
    /// Check membership of an exact (lowercase) token.
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Tokens re-joined by single spaces, in sorted order.
    pub fn joined(&self) -> String {
        self.iter().collect::<Vec<_>>().join(" ")
    }
}

impl<S: Into<String>> FromIterator<S> for TokenSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Normalize a raw query into its token set.
///
/// Total over any input; blank input yields an empty set.
pub fn normalize(raw: &str) -> TokenSet {
    raw.to_lowercase()
        .replace(',', "")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Key used for the full-phrase suggestion table: trimmed and lowercased,
/// but not tokenized.
pub fn phrase_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}
