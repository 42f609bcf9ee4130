//! HTTP client abstraction for testability

use async_trait::async_trait;

/// Abstraction over the HTTP client used for reachability probes
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait HttpClient: Send + Sync {
    /// Send a HEAD request to the given URL.
    ///
    /// Resolves `Ok` as soon as any response arrives, whatever its status.
    /// Only transport failures are errors.
    async fn head(&self, url: &str) -> crate::Result<()>;
}

/// Production HTTP client using reqwest
#[derive(Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn head(&self, url: &str) -> crate::Result<()> {
        tracing::debug!("HEAD {}", url);
        let response = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| crate::HostmonkError::Http(format!("HEAD {} failed: {}", url, e)))?;

        tracing::debug!("HEAD {} -> {}", url, response.status().as_u16());
        Ok(())
    }
}
