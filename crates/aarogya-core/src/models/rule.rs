//! Rule models for the mock diagnosis matcher.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::DiagnosisRecord;

/// Rule set validation errors.
#[derive(Error, Debug)]
pub enum RuleSetError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Rule {index} has an empty condition")]
    EmptyCondition { index: usize },

    #[error("Rule {index} has an empty predicate group")]
    EmptyGroup { index: usize },

    #[error("Rule {index} requires token {token:?}, which normalization can never produce")]
    UnmatchableToken { index: usize, token: String },
}

pub type RuleSetResult<T> = Result<T, RuleSetError>;

/// Boolean predicate over a token set.
///
/// Leaves test exact membership of a lowercase token; groups combine leaves
/// with AND (`All`) or OR (`Any`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    Token(String),
    All(Vec<Predicate>),
    Any(Vec<Predicate>),
}

impl Predicate {
    /// Conjunction of plain token tests.
    pub fn all_of(tokens: &[&str]) -> Self {
        Predicate::All(tokens.iter().map(|t| Predicate::Token(t.to_string())).collect())
    }

    /// Disjunction of sub-predicates.
    pub fn any(groups: Vec<Predicate>) -> Self {
        Predicate::Any(groups)
    }

    /// Every literal token this predicate mentions, in declaration order.
    pub fn tokens(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_tokens(&mut out);
        out
    }

    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Predicate::Token(t) => out.push(t),
            Predicate::All(ps) | Predicate::Any(ps) => {
                for p in ps {
                    p.collect_tokens(out);
                }
            }
        }
    }

    fn has_empty_group(&self) -> bool {
        match self {
            Predicate::Token(_) => false,
            Predicate::All(ps) | Predicate::Any(ps) => {
                ps.is_empty() || ps.iter().any(Predicate::has_empty_group)
            }
        }
    }
}

/// A predicate and the record it yields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rule {
    pub predicate: Predicate,
    pub record: DiagnosisRecord,
}

impl Rule {
    pub fn new(predicate: Predicate, record: DiagnosisRecord) -> Self {
        Self { predicate, record }
    }
}

/// Ordered rules plus the fallback record.
///
/// Rules are evaluated in declaration order and the first match wins, so the
/// order of `rules` is significant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleSet {
    pub rules: Vec<Rule>,
    pub fallback: DiagnosisRecord,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RuleSet {
    /// Build and validate a rule set.
    pub fn new(rules: Vec<Rule>, fallback: DiagnosisRecord) -> RuleSetResult<Self> {
        let set = Self { rules, fallback };
        set.validate()?;
        Ok(set)
    }

    /// Parse and validate a rule set from JSON.
    pub fn from_json(json: &str) -> RuleSetResult<Self> {
        let set: RuleSet = serde_json::from_str(json)?;
        set.validate()?;
        Ok(set)
    }

    /// The rule set shipped with the site.
    pub fn builtin() -> Self {
        Self {
            rules: vec![
                Rule::new(
                    Predicate::all_of(&["fever", "cough"]),
                    DiagnosisRecord::new(
                        "Flu or COVID-19",
                        &["COVID-19 RT-PCR", "Chest X-Ray", "CBC (Complete Blood Count)"],
                        "Pulmonologist",
                    ),
                ),
                Rule::new(
                    Predicate::all_of(&["headache", "nausea"]),
                    DiagnosisRecord::new(
                        "Migraine",
                        &["MRI Brain", "CT Scan", "Eye Examination"],
                        "Neurologist",
                    ),
                ),
                Rule::new(
                    Predicate::any(vec![
                        Predicate::all_of(&["swollen", "feet"]),
                        Predicate::all_of(&["leg", "pain"]),
                    ]),
                    DiagnosisRecord::new(
                        "Water Retention or Poor Circulation",
                        &["Doppler Ultrasound", "Kidney Function Test", "Electrolyte Panel"],
                        "Vascular Specialist",
                    ),
                ),
            ],
            fallback: DiagnosisRecord::general_viral_infection(),
        }
    }

    /// Check that every rule can actually fire.
    pub fn validate(&self) -> RuleSetResult<()> {
        for (index, rule) in self.rules.iter().enumerate() {
            if rule.record.condition.trim().is_empty() {
                return Err(RuleSetError::EmptyCondition { index });
            }
            if rule.predicate.has_empty_group() {
                return Err(RuleSetError::EmptyGroup { index });
            }
            for token in rule.predicate.tokens() {
                if !is_normal_token(token) {
                    return Err(RuleSetError::UnmatchableToken {
                        index,
                        token: token.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// True when `token` could come out of the normalizer unchanged.
fn is_normal_token(token: &str) -> bool {
    !token.is_empty()
        && !token.contains(',')
        && !token.chars().any(char::is_whitespace)
        && token.to_lowercase() == token
}
