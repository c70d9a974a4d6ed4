//! AarogyaSetu Core Library
//!
//! Symptom matching for the AarogyaSetu site: a rule-based mock diagnosis and
//! a full-phrase test suggestion lookup.
//!
//! # Architecture
//!
//! ```text
//! Query ──► normalize ──► TokenSet ──► ordered rules ──► DiagnosisRecord
//!   │                                       │
//!   │                                       └─(no match)─► fallback record
//!   │
//!   └──► phrase_key ──► SuggestionTable ──► Found(tests) | NotFound
//! ```
//!
//! The two paths are independent and deliberately not merged.
//!
//! # Modules
//!
//! - [`models`]: Domain types (DiagnosisRecord, Rule, RuleSet, AppState, Theme)
//! - [`matcher`]: Token normalizer and rule evaluator
//! - [`suggestions`]: Suggestion table and full-phrase lookup
//! - [`presentation`]: Presenter trait and a plain-text implementation
//! - [`theme_store`]: Persisted light/dark preference
//! - [`config`]: TOML configuration

pub mod config;
pub mod matcher;
pub mod models;
pub mod presentation;
pub mod suggestions;
pub mod theme_store;

// Re-export commonly used types
pub use config::AppConfig;
pub use matcher::{normalize, MatchOutcome, SymptomMatcher, TokenSet};
pub use models::{AppState, DiagnosisRecord, Predicate, Rule, RuleSet, Theme};
pub use presentation::{Notice, NoticeKind, Presenter, TextPresenter};
pub use suggestions::{lookup_suggestions, SuggestionOutcome, SuggestionTable};
pub use theme_store::ThemeStore;

// =========================================================================
// Crate Error Type
// =========================================================================

#[derive(Debug, thiserror::Error)]
pub enum AarogyaError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Rule set error: {0}")]
    Rules(#[from] models::RuleSetError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AarogyaResult<T> = Result<T, AarogyaError>;
