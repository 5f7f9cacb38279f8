use super::transport::{Body, Transport};
use crate::error::AppError;

use futures::StreamExt;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use url::Url;

pub const MAX_REDIRECTS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    /// Terminal status the source does not accept
    Status(u16),
    /// Body smaller than the configured minimum, usually an HTML error page
    Undersized { bytes: u64, minimum: u64 },
    /// Still redirecting after the allowed number of hops
    TooManyRedirects { hops: usize },
}

/// Result of a single attempt against one URL
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Saved { bytes: u64 },
    Rejected(Rejection),
    Failed(String),
}

impl FetchOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, FetchOutcome::Saved { .. })
    }
}

/// The fetch primitive shared by `fetch` and `repair`
#[derive(Clone)]
pub struct Downloader {
    transport: Arc<dyn Transport>,
    user_agent: String,
    max_redirects: usize,
    min_bytes: Option<u64>,
}

impl Downloader {
    pub fn new(transport: Arc<dyn Transport>, user_agent: &str) -> Self {
        Self {
            transport,
            user_agent: user_agent.to_owned(),
            max_redirects: MAX_REDIRECTS,
            min_bytes: None,
        }
    }

    pub fn with_max_redirects(self, max_redirects: usize) -> Self {
        Self {
            max_redirects,
            ..self
        }
    }

    pub fn with_min_bytes(self, min_bytes: Option<u64>) -> Self {
        Self { min_bytes, ..self }
    }

    /// GET `url` into `dest`, following redirects. Nothing is left at `dest` unless the outcome is `Saved`.
    pub async fn download(&self, url: &str, dest: &Path, accept: fn(u16) -> bool) -> FetchOutcome {
        debug!("Trying {}", url);
        let outcome = match self.try_download(url, dest, accept).await {
            Ok(outcome) => outcome,
            Err(e) => {
                debug!("Error fetching {}: {}", url, e);
                FetchOutcome::Failed(e.to_string())
            }
        };

        match &outcome {
            FetchOutcome::Saved { bytes } => {
                debug!("Wrote {} bytes to {}", bytes, dest.to_string_lossy())
            }
            FetchOutcome::Rejected(rejection) => {
                debug!("Rejected {}: {:?}", url, rejection);
                discard(dest).await;
            }
            FetchOutcome::Failed(_) => discard(dest).await,
        }
        outcome
    }

    async fn try_download(
        &self,
        url: &str,
        dest: &Path,
        accept: fn(u16) -> bool,
    ) -> Result<FetchOutcome, AppError> {
        let mut current = Url::parse(url).map_err(|source| AppError::Url {
            url: url.to_owned(),
            source,
        })?;
        let mut hops = 0;

        loop {
            let response = self.transport.get(current.as_str(), &self.user_agent).await?;

            if response.is_redirect() {
                if hops >= self.max_redirects {
                    return Ok(FetchOutcome::Rejected(Rejection::TooManyRedirects { hops }));
                }
                hops += 1;
                let location = response.location.unwrap_or_default();
                current = current.join(&location).map_err(|source| AppError::Url {
                    url: location.clone(),
                    source,
                })?;
                debug!("Following redirect to {}", current);
                continue;
            }

            if !accept(response.status) {
                return Ok(FetchOutcome::Rejected(Rejection::Status(response.status)));
            }

            let bytes = write_body(response.body, dest).await?;
            if let Some(minimum) = self.min_bytes {
                if bytes < minimum {
                    return Ok(FetchOutcome::Rejected(Rejection::Undersized { bytes, minimum }));
                }
            }
            return Ok(FetchOutcome::Saved { bytes });
        }
    }
}

/// Streams the body to disk, returning once everything is flushed
async fn write_body(mut body: Body, dest: &Path) -> Result<u64, AppError> {
    let mut file = tokio::fs::File::create(dest).await?;
    let mut written = 0u64;
    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}

async fn discard(dest: &Path) {
    match tokio::fs::remove_file(dest).await {
        Ok(()) => debug!("Removed partial file {}", dest.to_string_lossy()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!("Could not remove {}: {}", dest.to_string_lossy(), e),
    }
}
