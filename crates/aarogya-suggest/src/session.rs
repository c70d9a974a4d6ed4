//! Presentation-owned session.
//!
//! Owns the only mutable [`AppState`] and routes every outcome (including
//! blank input, no match and fetch failures) to the presenter. Nothing here
//! is fatal; the session stays usable after any of them.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use aarogya_core::config::{AppConfig, MessagesConfig};
use aarogya_core::matcher::phrase_key;
use aarogya_core::suggestions::{lookup_suggestions, SuggestionOutcome};
use aarogya_core::{AppState, MatchOutcome, Notice, Presenter, SymptomMatcher, Theme, ThemeStore};
use tracing::warn;

use crate::fetcher::SuggestionFetcher;
use crate::source::{source_for, FetchError};
use crate::SessionResult;

/// Maximum number of "did you mean" keys offered.
const MAX_HINTS: usize = 3;

/// What a suggestion request ended up showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestStatus {
    EmptyInput,
    Found(usize),
    NotFound,
    Failed,
    /// A newer request overtook this one; nothing was rendered.
    Superseded,
}

pub struct Session<P: Presenter> {
    matcher: SymptomMatcher,
    fetcher: Arc<SuggestionFetcher>,
    messages: MessagesConfig,
    theme_store: Option<ThemeStore>,
    state: AppState,
    presenter: P,
}

impl<P: Presenter> Session<P> {
    pub fn new(matcher: SymptomMatcher, fetcher: Arc<SuggestionFetcher>, presenter: P) -> Self {
        Self {
            matcher,
            fetcher,
            messages: MessagesConfig::default(),
            theme_store: None,
            state: AppState::default(),
            presenter,
        }
    }

    /// Build a session from config: rules, table source, theme store and
    /// message strings.
    pub fn from_config(config: &AppConfig, presenter: P) -> SessionResult<Self> {
        let matcher = SymptomMatcher::from_config(&config.matcher)?;
        let source = source_for(
            &config.suggestions.source,
            &config.suggestions.data_dir,
            Duration::from_secs(config.suggestions.timeout_secs),
        )?;
        let fetcher = SuggestionFetcher::new(source).with_cache(config.suggestions.cache);

        Ok(Self::new(matcher, Arc::new(fetcher), presenter)
            .with_messages(config.messages.clone())
            .with_theme_store(ThemeStore::new(&config.theme.store_path)))
    }

    pub fn with_messages(mut self, messages: MessagesConfig) -> Self {
        self.messages = messages;
        self
    }

    /// Attach a theme store and adopt its stored preference.
    pub fn with_theme_store(mut self, store: ThemeStore) -> Self {
        self.state = AppState::with_theme(store.load());
        self.theme_store = Some(store);
        self
    }

    /// Apply the current theme to the presenter.
    pub fn start(&mut self) -> io::Result<()> {
        self.presenter.apply_theme(self.state.theme)
    }

    /// Run the rule matcher and render the outcome.
    pub fn diagnose(&mut self, query: &str) -> io::Result<()> {
        let visible = match self.matcher.diagnose(query) {
            MatchOutcome::EmptyInput => {
                self.presenter.show_notice(&Notice::info(&self.messages.empty_input))?;
                false
            }
            MatchOutcome::Matched { record, .. } | MatchOutcome::Fallback(record) => {
                self.presenter.show_diagnosis(record)?;
                true
            }
        };
        self.state = std::mem::take(&mut self.state).submitted(query, visible);
        Ok(())
    }

    /// Fetch the suggestion table and render tests for the full phrase.
    pub async fn suggest(&mut self, query: &str) -> io::Result<SuggestStatus> {
        let key = phrase_key(query);
        if key.is_empty() {
            self.presenter.show_notice(&Notice::info(&self.messages.empty_input))?;
            self.state = std::mem::take(&mut self.state).submitted(query, false);
            return Ok(SuggestStatus::EmptyInput);
        }

        let status = match self.fetcher.fetch().await {
            Ok(table) => match lookup_suggestions(&key, &table) {
                SuggestionOutcome::Found(tests) => {
                    self.presenter
                        .show_notice(&Notice::success(format!("Suggested tests for \"{}\":", key)))?;
                    self.presenter.show_suggestions(&tests)?;
                    SuggestStatus::Found(tests.len())
                }
                SuggestionOutcome::NotFound => {
                    let hints = table.similar_keys(&key, MAX_HINTS);
                    let message = if hints.is_empty() {
                        self.messages.no_suggestions.clone()
                    } else {
                        format!("{} Did you mean: {}?", self.messages.no_suggestions, hints.join(", "))
                    };
                    self.presenter.show_notice(&Notice::info(message))?;
                    SuggestStatus::NotFound
                }
            },
            Err(FetchError::Superseded) => {
                warn!(query = %key, "discarding superseded suggestion request");
                return Ok(SuggestStatus::Superseded);
            }
            Err(_) => {
                self.presenter.show_notice(&Notice::error(&self.messages.fetch_error))?;
                SuggestStatus::Failed
            }
        };

        let visible = matches!(status, SuggestStatus::Found(_));
        self.state = std::mem::take(&mut self.state).submitted(query, visible);
        Ok(status)
    }

    /// Clear input and results, cancelling any outstanding fetch.
    pub fn reset(&mut self) -> io::Result<()> {
        self.fetcher.cancel_in_flight();
        self.state = std::mem::take(&mut self.state).reset();
        self.presenter.clear()
    }

    /// Switch between light and dark, persisting the choice.
    pub fn toggle_theme(&mut self) -> io::Result<Theme> {
        self.state = std::mem::take(&mut self.state).toggle_theme();
        let theme = self.state.theme;
        self.presenter.apply_theme(theme)?;

        if let Some(store) = &self.theme_store {
            if let Err(e) = store.save(theme) {
                warn!(path = %store.path().display(), error = %e, "could not save theme preference");
            }
        }
        Ok(theme)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }
}
