//! Diagnosis records returned by the rule evaluator.

use serde::{Deserialize, Serialize};

/// Canned result attached to a rule (or used as the fallback).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiagnosisRecord {
    /// Condition name shown to the user (e.g., "Migraine")
    pub condition: String,
    /// Suggested tests, in display order
    pub recommended_tests: Vec<String>,
    /// Specialist to consult (e.g., "Neurologist")
    pub recommended_specialist: String,
}

impl DiagnosisRecord {
    /// Create a record from borrowed parts.
    pub fn new(condition: &str, recommended_tests: &[&str], recommended_specialist: &str) -> Self {
        Self {
            condition: condition.to_string(),
            recommended_tests: recommended_tests.iter().map(|t| t.to_string()).collect(),
            recommended_specialist: recommended_specialist.to_string(),
        }
    }

    /// The record returned when no rule matches.
    pub fn general_viral_infection() -> Self {
        Self::new(
            "General Viral Infection",
            &["CBC (Complete Blood Count)", "Throat Swab", "Rapid Antigen Test"],
            "General Physician",
        )
    }
}
