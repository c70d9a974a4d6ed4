//! Full-phrase test suggestions.
//!
//! Unlike the rule matcher, the whole trimmed, lowercased query is used as a
//! single table key; it is never tokenized.

mod table;

pub use table::*;

use tracing::debug;

use crate::matcher::phrase_key;

/// Result of a suggestion lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionOutcome {
    Found(Vec<String>),
    NotFound,
}

impl SuggestionOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SuggestionOutcome::Found(_))
    }
}

/// Look up the tests suggested for a symptom phrase.
///
/// Absent keys, blank input and empty test lists are all `NotFound`.
pub fn lookup_suggestions(symptom: &str, table: &SuggestionTable) -> SuggestionOutcome {
    let key = phrase_key(symptom);
    if key.is_empty() {
        return SuggestionOutcome::NotFound;
    }

    match table.get(&key) {
        Some(tests) if !tests.is_empty() => {
            debug!(key = %key, count = tests.len(), "suggestions found");
            SuggestionOutcome::Found(tests.to_vec())
        }
        _ => {
            debug!(key = %key, "no suggestions");
            SuggestionOutcome::NotFound
        }
    }
}
