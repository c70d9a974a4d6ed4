//! Ordered rule evaluation.

use tracing::debug;

use crate::models::{DiagnosisRecord, Predicate, Rule};

use super::TokenSet;

impl Predicate {
    /// Evaluate against a token set using exact membership.
    pub fn holds(&self, tokens: &TokenSet) -> bool {
        match self {
            Predicate::Token(t) => tokens.contains(t),
            Predicate::All(ps) => ps.iter().all(|p| p.holds(tokens)),
            Predicate::Any(ps) => ps.iter().any(|p| p.holds(tokens)),
        }
    }
}

/// Index of the first rule whose predicate holds.
pub fn first_match(tokens: &TokenSet, rules: &[Rule]) -> Option<usize> {
    rules.iter().position(|rule| rule.predicate.holds(tokens))
}

/// Return the record of the first matching rule, or `fallback`.
pub fn evaluate<'a>(
    tokens: &TokenSet,
    rules: &'a [Rule],
    fallback: &'a DiagnosisRecord,
) -> &'a DiagnosisRecord {
    evaluate_indexed(tokens, rules, fallback).1
}

/// Like [`evaluate`], also reporting which rule fired (`None` for the
/// fallback).
pub fn evaluate_indexed<'a>(
    tokens: &TokenSet,
    rules: &'a [Rule],
    fallback: &'a DiagnosisRecord,
) -> (Option<usize>, &'a DiagnosisRecord) {
    match first_match(tokens, rules) {
        Some(index) => {
            debug!(index, condition = %rules[index].record.condition, "rule matched");
            (Some(index), &rules[index].record)
        }
        None => {
            debug!(tokens = %tokens.joined(), "no rule matched, using fallback");
            (None, fallback)
        }
    }
}
