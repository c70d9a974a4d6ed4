//! Symptom → test-name table loaded from the static data resource.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;
use thiserror::Error;

/// Minimum Jaro-Winkler similarity for a "did you mean" hint.
const SIMILAR_KEY_THRESHOLD: f64 = 0.85;

/// Table parse errors.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Malformed suggestion table: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub type TableResult<T> = Result<T, TableError>;

/// Read-only mapping from a symptom phrase to suggested tests.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SuggestionTable {
    entries: HashMap<String, Vec<String>>,
}

impl SuggestionTable {
    /// Parse a table from a JSON object of string → string array.
    pub fn from_json(json: &str) -> TableResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a table from raw JSON bytes (e.g., a response body).
    pub fn from_json_slice(bytes: &[u8]) -> TableResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Exact key lookup.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys close to `key`, best first. Used only as a display hint.
    pub fn similar_keys(&self, key: &str, limit: usize) -> Vec<&str> {
        if key.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(f64, &str)> = self
            .entries
            .keys()
            .map(|k| (jaro_winkler(key, k), k.as_str()))
            .filter(|(score, k)| *score >= SIMILAR_KEY_THRESHOLD && *k != key)
            .collect();

        // Sort by score descending, then key for stable output
        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.1.cmp(b.1))
        });
        scored.truncate(limit);
        scored.into_iter().map(|(_, k)| k).collect()
    }
}

impl<K: Into<String>, V: IntoIterator<Item = T>, T: Into<String>> FromIterator<(K, V)>
    for SuggestionTable
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into_iter().map(Into::into).collect()))
                .collect(),
        }
    }
}
