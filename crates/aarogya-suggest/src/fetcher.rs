//! Cancellable suggestion-table fetching.
//!
//! Each call to [`SuggestionFetcher::fetch`] cancels whatever fetch was still
//! in flight, so a slow stale response can never overwrite a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use aarogya_core::suggestions::SuggestionTable;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::source::{FetchError, FetchResult, TableSource};

/// Fetches the suggestion table, one live request at a time.
pub struct SuggestionFetcher {
    source: Arc<dyn TableSource>,
    cache_enabled: bool,
    cached: Mutex<Option<Arc<SuggestionTable>>>,
    in_flight: Mutex<Option<(u64, CancellationToken)>>,
    next_id: AtomicU64,
}

impl SuggestionFetcher {
    /// Create a fetcher that loads fresh on every call.
    pub fn new(source: Arc<dyn TableSource>) -> Self {
        Self {
            source,
            cache_enabled: false,
            cached: Mutex::new(None),
            in_flight: Mutex::new(None),
            next_id: AtomicU64::new(1),
        }
    }

    /// Keep the last successfully loaded table and reuse it.
    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    /// Load the table, superseding any fetch still in flight.
    ///
    /// Returns [`FetchError::Superseded`] if a newer call (or
    /// [`cancel_in_flight`](Self::cancel_in_flight)) overtakes this one.
    pub async fn fetch(&self) -> FetchResult<Arc<SuggestionTable>> {
        if let Some(table) = self.cached_table() {
            debug!("using cached suggestion table");
            return Ok(table);
        }

        let (id, token) = self.begin();
        info!(request = id, source = %self.source.describe(), "fetching suggestion table");

        let result = tokio::select! {
            biased;
            _ = token.cancelled() => Err(FetchError::Superseded),
            loaded = self.source.load() => loaded,
        };
        self.finish(id);

        match result {
            Ok(table) => {
                info!(request = id, entries = table.len(), "suggestion table loaded");
                let table = Arc::new(table);
                if self.cache_enabled {
                    *lock(&self.cached) = Some(Arc::clone(&table));
                }
                Ok(table)
            }
            Err(FetchError::Superseded) => {
                debug!(request = id, "suggestion fetch superseded");
                Err(FetchError::Superseded)
            }
            Err(e) => {
                error!(request = id, source = %self.source.describe(), error = %e, "suggestion fetch failed");
                Err(e)
            }
        }
    }

    /// Cancel the in-flight fetch, if any.
    pub fn cancel_in_flight(&self) {
        if let Some((id, token)) = lock(&self.in_flight).take() {
            debug!(request = id, "cancelling suggestion fetch");
            token.cancel();
        }
    }

    /// Drop the cached table so the next fetch reloads.
    pub fn invalidate(&self) {
        lock(&self.cached).take();
    }

    fn cached_table(&self) -> Option<Arc<SuggestionTable>> {
        if !self.cache_enabled {
            return None;
        }
        lock(&self.cached).clone()
    }

    fn begin(&self) -> (u64, CancellationToken) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let token = CancellationToken::new();
        if let Some((prev, stale)) = lock(&self.in_flight).replace((id, token.clone())) {
            debug!(request = prev, superseded_by = id, "superseding suggestion fetch");
            stale.cancel();
        }
        (id, token)
    }

    fn finish(&self, id: u64) {
        let mut slot = lock(&self.in_flight);
        if matches!(slot.as_ref(), Some((current, _)) if *current == id) {
            slot.take();
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
