//! Suggestion fetching and the interactive session for AarogyaSetu.
//!
//! The suggestion table lives outside the binary (a JSON file or URL), so it
//! is loaded asynchronously. A newer request cancels an older one that is
//! still in flight.

pub mod fetcher;
pub mod session;
pub mod source;

pub use fetcher::SuggestionFetcher;
pub use session::{Session, SuggestStatus};
pub use source::{source_for, FetchError, FetchResult, FileSource, HttpSource, TableSource};

use thiserror::Error;

/// Session setup errors.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Core(#[from] aarogya_core::AarogyaError),

    #[error("Could not set up suggestion source: {0}")]
    Source(#[from] FetchError),
}

pub type SessionResult<T> = Result<T, SessionError>;
