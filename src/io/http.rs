use async_trait::async_trait;
use reqwest::{Client, Response};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::Fetch;
use anyhow::{Result, bail};

/// HTTP client for the package index and package downloads
pub struct HttpFetcher {
    client: Client,
    transferred_bytes: AtomicU64,
    max_retry: u32,
}

impl HttpFetcher {
    /// Create a new fetcher
    ///
    /// `timeout` bounds each request including the body transfer.
    pub fn new(timeout: Duration, max_retry: u32) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            transferred_bytes: AtomicU64::new(0),
            max_retry: max_retry.max(1),
        })
    }

    /// Get total bytes received from the network
    pub fn transferred_bytes(&self) -> u64 {
        self.transferred_bytes.load(Ordering::Relaxed)
    }

    /// Send a GET request, retrying timeouts and connection failures
    async fn get(&self, url: &Url) -> Result<Response> {
        let mut retry_count = 0;

        loop {
            debug!("GET {url}");
            match self.client.get(url.clone()).send().await {
                Ok(resp) => {
                    if !resp.status().is_success() {
                        bail!("HTTP request to {} failed with status: {}", url, resp.status());
                    }
                    return Ok(resp);
                }
                Err(e) if e.is_timeout() || e.is_connect() => {
                    retry_count += 1;
                    if retry_count >= self.max_retry {
                        bail!("Max retries exceeded for {}: {}", url, e);
                    }
                    warn!(
                        "Connection error, retry {}/{}: {}",
                        retry_count, self.max_retry, e
                    );
                    tokio::time::sleep(Duration::from_millis(500 * retry_count as u64)).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn get_text(&self, url: &Url) -> Result<String> {
        let body = self.get(url).await?.text().await?;
        self.transferred_bytes
            .fetch_add(body.len() as u64, Ordering::Relaxed);
        Ok(body)
    }

    async fn get_bytes(&self, url: &Url) -> Result<Vec<u8>> {
        let bytes = self.get(url).await?.bytes().await?;
        self.transferred_bytes
            .fetch_add(bytes.len() as u64, Ordering::Relaxed);
        Ok(bytes.to_vec())
    }
}
