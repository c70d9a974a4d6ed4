//! Where the suggestion table comes from.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use aarogya_core::suggestions::{SuggestionTable, TableError};
use async_trait::async_trait;
use thiserror::Error;

/// Fetch errors.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error(transparent)]
    Malformed(#[from] TableError),

    #[error("Request superseded by a newer one")]
    Superseded,
}

pub type FetchResult<T> = Result<T, FetchError>;

/// A read-only location the table can be loaded from.
#[async_trait]
pub trait TableSource: Send + Sync {
    /// Load and parse the whole table.
    async fn load(&self) -> FetchResult<SuggestionTable>;

    /// Human-readable location for logs.
    fn describe(&self) -> String;
}

/// Table stored in a local JSON file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl TableSource for FileSource {
    async fn load(&self) -> FetchResult<SuggestionTable> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| FetchError::Io {
                path: self.path.clone(),
                source,
            })?;
        Ok(SuggestionTable::from_json_slice(&bytes)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Table served over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> FetchResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl TableSource for HttpSource {
    async fn load(&self) -> FetchResult<SuggestionTable> {
        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: self.url.clone(),
            });
        }

        let body = response.bytes().await?;
        Ok(SuggestionTable::from_json_slice(&body)?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Pick a source for a configured location.
///
/// `http://` and `https://` locations are fetched over the network; anything
/// else is a path, resolved against `data_dir` when relative.
pub fn source_for(
    location: &str,
    data_dir: &Path,
    timeout: Duration,
) -> FetchResult<Arc<dyn TableSource>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        return Ok(Arc::new(HttpSource::new(location, timeout)?));
    }

    let path = Path::new(location);
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        data_dir.join(path)
    };
    Ok(Arc::new(FileSource::new(path)))
}
