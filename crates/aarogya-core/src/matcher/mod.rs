//! Symptom matcher for mock diagnoses.
//!
//! Pipeline: Query → Normalization → Ordered Rule Evaluation → Diagnosis Record

mod evaluator;
mod normalizer;

pub use evaluator::*;
pub use normalizer::*;

use tracing::debug;

use crate::config::MatcherConfig;
use crate::models::{DiagnosisRecord, RuleSet};
use crate::AarogyaResult;

/// Result of diagnosing one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome<'a> {
    /// Query was blank after normalization; nothing was evaluated.
    EmptyInput,
    /// A rule fired.
    Matched {
        rule_index: usize,
        record: &'a DiagnosisRecord,
    },
    /// No rule fired; the fallback record applies.
    Fallback(&'a DiagnosisRecord),
}

impl<'a> MatchOutcome<'a> {
    /// The record to display, if any.
    pub fn record(&self) -> Option<&'a DiagnosisRecord> {
        match self {
            MatchOutcome::EmptyInput => None,
            MatchOutcome::Matched { record, .. } => Some(record),
            MatchOutcome::Fallback(record) => Some(record),
        }
    }
}

/// Matcher over an immutable rule set.
#[derive(Debug, Clone, Default)]
pub struct SymptomMatcher {
    rules: RuleSet,
}

impl SymptomMatcher {
    /// Create a matcher with the built-in rules.
    pub fn new() -> Self {
        Self::with_rules(RuleSet::builtin())
    }

    /// Create a matcher over a custom rule set.
    pub fn with_rules(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Build from config: a JSON rule file if one is set, else the built-in
    /// rules.
    pub fn from_config(config: &MatcherConfig) -> AarogyaResult<Self> {
        match &config.rules_path {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                let rules = RuleSet::from_json(&json)?;
                debug!(path = %path.display(), rules = rules.len(), "loaded custom rule set");
                Ok(Self::with_rules(rules))
            }
            None => Ok(Self::new()),
        }
    }

    /// Normalize and evaluate a raw query.
    ///
    /// Blank queries short-circuit to [`MatchOutcome::EmptyInput`] without
    /// touching the rules.
    pub fn diagnose(&self, query: &str) -> MatchOutcome<'_> {
        let tokens = normalize(query);
        self.diagnose_tokens(&tokens)
    }

    /// Evaluate an already-normalized token set.
    pub fn diagnose_tokens(&self, tokens: &TokenSet) -> MatchOutcome<'_> {
        if tokens.is_empty() {
            return MatchOutcome::EmptyInput;
        }

        let (rule_index, record) =
            evaluate_indexed(tokens, &self.rules.rules, &self.rules.fallback);
        match rule_index {
            Some(rule_index) => MatchOutcome::Matched { rule_index, record },
            None => MatchOutcome::Fallback(record),
        }
    }

    /// Get the rule set for direct access.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}
