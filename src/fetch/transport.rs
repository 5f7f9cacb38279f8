//! The single capability the fetcher needs from the network: one GET that
//! does *not* follow redirects, returning the status, the `location` header
//! and a streamed body.

use crate::error::AppError;

use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};
use std::time::Duration;

pub type Body = BoxStream<'static, Result<Vec<u8>, AppError>>;

pub struct Response {
    pub status: u16,
    pub location: Option<String>,
    pub body: Body,
}

impl Response {
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status) && self.location.is_some()
    }
}

impl std::fmt::Debug for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, user_agent: &str) -> Result<Response, AppError>;
}

/// reqwest with automatic redirects switched off, so hops are counted by the downloader
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self, AppError> {
        let mut builder = reqwest::Client::builder().redirect(reqwest::redirect::Policy::none());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str, user_agent: &str) -> Result<Response, AppError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, user_agent)
            .send()
            .await?;

        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_owned());
        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map(|b| b.to_vec()).map_err(AppError::from))
            .boxed();

        Ok(Response {
            status,
            location,
            body,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reqwest_transport_creation() {
        assert!(ReqwestTransport::new(None).is_ok());
        assert!(ReqwestTransport::new(Some(Duration::from_secs(5))).is_ok());
    }

    #[test]
    fn test_redirect_requires_location() {
        let with_location = Response {
            status: 302,
            location: Some("https://example.com/".to_owned()),
            body: futures::stream::empty().boxed(),
        };
        let without_location = Response {
            status: 302,
            location: None,
            body: futures::stream::empty().boxed(),
        };
        assert!(with_location.is_redirect());
        assert!(!without_location.is_redirect());
    }
}
