mod http;

pub use http::HttpFetcher;

use anyhow::Result;
use async_trait::async_trait;
use url::Url;

/// Trait for retrieving remote documents and package archives
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetch a page and decode it as text
    async fn get_text(&self, url: &Url) -> Result<String>;

    /// Fetch a whole resource into memory
    async fn get_bytes(&self, url: &Url) -> Result<Vec<u8>>;
}
