//! Package lookups against the Debian package index website.
//!
//! packages.debian.org has no JSON API for these queries, so every lookup
//! fetches a page and scrapes it (see [`html`]).

pub mod html;

use std::sync::Arc;

use anyhow::{Result, anyhow};
use tracing::debug;
use url::Url;

use crate::io::Fetch;

pub const DEFAULT_INDEX_URL: &str = "https://packages.debian.org";

/// Client for the package search, file list and download pages
pub struct PackageIndex<F: Fetch> {
    fetcher: Arc<F>,
    base_url: Url,
}

impl<F: Fetch> PackageIndex<F> {
    pub fn new(fetcher: Arc<F>, base_url: Url) -> Self {
        Self { fetcher, base_url }
    }

    /// Packages of `suite`/`arch` shipping a file named `file_name`.
    ///
    /// `arch` may be `any` to search all architectures.
    pub async fn search_packages_by_file(
        &self,
        suite: &str,
        arch: &str,
        file_name: &str,
    ) -> Result<Vec<String>> {
        let mut url = self.endpoint(&["search"])?;
        url.query_pairs_mut()
            .append_pair("mode", "filename")
            .append_pair("suite", suite)
            .append_pair("arch", arch)
            .append_pair("searchon", "contents")
            .append_pair("keywords", file_name);

        let page = self.fetcher.get_text(&url).await?;
        let packages = html::parse_file_search(&page)?;
        debug!("{file_name}: {} packages in {suite}/{arch}", packages.len());
        Ok(packages)
    }

    /// Package names matching `name` across all suites.
    pub async fn search_packages_by_name(&self, name: &str) -> Result<Vec<String>> {
        let mut url = self.endpoint(&["search"])?;
        url.query_pairs_mut().append_pair("keywords", name);

        let page = self.fetcher.get_text(&url).await?;
        html::parse_name_search(&page)
    }

    /// Paths installed by `package`.
    pub async fn file_list(&self, suite: &str, arch: &str, package: &str) -> Result<Vec<String>> {
        let url = self.endpoint(&[suite, arch, package, "filelist"])?;
        let page = self.fetcher.get_text(&url).await?;
        html::parse_file_list(&page)
    }

    /// Mirror URLs of the `.deb` for `package`.
    pub async fn download_links(
        &self,
        suite: &str,
        arch: &str,
        package: &str,
    ) -> Result<Vec<String>> {
        let url = self.endpoint(&[suite, arch, package, "download"])?;
        let page = self.fetcher.get_text(&url).await?;
        let links = html::parse_download_links(&page)?;
        debug!("{package}: {} download links", links.len());
        Ok(links)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("{} cannot be used as a base URL", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Pick the first link served by `mirror`, falling back to the first link.
pub fn pick_download_link<'a>(links: &'a [String], mirror: &str) -> Option<&'a str> {
    links
        .iter()
        .find(|link| link.contains(mirror))
        .or_else(|| links.first())
        .map(String::as_str)
}
