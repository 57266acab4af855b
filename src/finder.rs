//! Locating, downloading and extracting the files of one request group.

use std::io::Cursor;
use std::sync::Arc;

use anyhow::{Result, bail};
use tracing::{debug, info};
use url::Url;

use crate::deb::{ExtractError, extract_file};
use crate::index::{PackageIndex, pick_download_link};
use crate::io::Fetch;
use crate::request::FileGroup;

/// Which packages to search and where to download them from
#[derive(Debug, Clone)]
pub struct FinderOptions {
    pub suite: String,
    pub arch: String,
    pub search_arch: String,
    pub mirror: String,
    pub quiet: bool,
}

pub struct Finder<F: Fetch> {
    index: PackageIndex<F>,
    fetcher: Arc<F>,
    options: FinderOptions,
}

impl<F: Fetch> Finder<F> {
    pub fn new(fetcher: Arc<F>, index_url: Url, options: FinderOptions) -> Self {
        Self {
            index: PackageIndex::new(fetcher.clone(), index_url),
            fetcher,
            options,
        }
    }

    pub fn index(&self) -> &PackageIndex<F> {
        &self.index
    }

    /// Download links of the first package shipping any name of `group`.
    ///
    /// Names are tried longest first; lookup failures are reported and the
    /// next candidate is tried.
    pub async fn locate(&self, group: &FileGroup) -> Vec<String> {
        let opts = &self.options;

        for name in &group.names {
            self.progress(format!("Search: {name}"));
            let packages = match self
                .index
                .search_packages_by_file(&opts.suite, &opts.search_arch, name)
                .await
            {
                Ok(packages) => packages,
                Err(e) => {
                    self.progress(format!("\t{e:#}"));
                    continue;
                }
            };
            self.progress(format!("\tFound {} packages", packages.len()));

            for package in &packages {
                self.progress(format!("Download: {name}"));
                let links = match self
                    .index
                    .download_links(&opts.suite, &opts.arch, package)
                    .await
                {
                    Ok(links) => links,
                    Err(e) => {
                        self.progress(format!("\t{e:#}"));
                        continue;
                    }
                };
                self.progress(format!("\tFound {} links", links.len()));
                if !links.is_empty() {
                    info!("{} provided by {package}", group.stem);
                    return links;
                }
            }
        }

        Vec::new()
    }

    /// Locate, download and extract the file requested by `group`.
    ///
    /// # Returns
    ///
    /// The extracted file content, ready to be written under every name of
    /// the group.
    pub async fn fetch_group(&self, group: &FileGroup) -> Result<Vec<u8>> {
        let links = self.locate(group).await;
        let Some(link) = pick_download_link(&links, &self.options.mirror) else {
            bail!("no links");
        };

        self.progress(format!("\tDownloading from {link}"));
        let archive = self.fetcher.get_bytes(&Url::parse(link)?).await?;
        self.progress(format!("\tReceived {} bytes", archive.len()));

        let targets = group.names.clone();
        let data = tokio::task::spawn_blocking(move || -> Result<Vec<u8>, ExtractError> {
            let mut source = Cursor::new(archive);
            let mut sink = Vec::new();
            extract_file(&targets, &mut source, &mut sink)?;
            Ok(sink)
        })
        .await??;
        debug!("extracted {} bytes for {}", data.len(), group.stem);

        Ok(data)
    }

    fn progress(&self, line: String) {
        if !self.options.quiet {
            println!("{line}");
        }
    }
}
