//! HTTP implementation of the image fetch port.

use bytes::Bytes;

use crate::domain::entities::ImageLocator;
use crate::domain::ports::{FetchError, FetchResult, ImageFetchPort};

/// Request timeout in seconds.
const TIMEOUT_SECS: u64 = 30;

/// Fetches catalog images over HTTPS with a shared connection pool.
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    client: reqwest::Client,
}

impl HttpImageFetcher {
    /// Creates a fetcher with the default timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new() -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(TIMEOUT_SECS))
            .build()
            .map_err(|e| FetchError::Network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl ImageFetchPort for HttpImageFetcher {
    async fn fetch(&self, locator: &ImageLocator) -> FetchResult<Bytes> {
        let response = self
            .client
            .get(locator.as_str())
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(FetchError::Http(response.status().as_u16()));
        }

        response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(format!("failed to read body: {e}")))
    }
}
