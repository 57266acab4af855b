//! Main entry point for the finddeb CLI application.
//!
//! Looks up the Debian packages shipping the requested files, downloads
//! them and writes the files into the download directory.

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use finddeb::request::{FileGroup, group_file_names};
use finddeb::{Cli, Fetch, Finder, FinderOptions, HttpFetcher, PackageIndex, output};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = EnvFilter::builder()
        .with_default_directive(cli.log_level().into())
        .from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let fetcher = Arc::new(HttpFetcher::new(cli.request_timeout(), cli.retries)?);
    let finder = Finder::new(
        fetcher.clone(),
        cli.index_url.clone(),
        FinderOptions {
            suite: cli.suite.clone(),
            arch: cli.arch.clone(),
            search_arch: cli.search_arch().to_string(),
            mirror: cli.mirror.clone(),
            quiet: cli.quiet,
        },
    );

    if cli.search {
        search(finder.index(), &cli).await;
        return Ok(());
    }

    if cli.list {
        list(finder.index(), &cli).await;
        return Ok(());
    }

    let failed = download_all(&finder, &cli).await;
    tracing::info!("{} bytes transferred", fetcher.transferred_bytes());

    if !failed.is_empty() {
        println!();
        println!("Files failed to download: {}", failed.join(" "));
        std::process::exit(1);
    }

    if !cli.quiet {
        println!();
        println!("Done!");
    }
    Ok(())
}

/// Print the packages shipping each requested file.
async fn search<F: Fetch>(index: &PackageIndex<F>, cli: &Cli) {
    for (i, name) in cli.files.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("Search results for: {name}");
        match index
            .search_packages_by_file(&cli.suite, cli.search_arch(), name)
            .await
        {
            Ok(packages) => packages.iter().for_each(|p| println!("\t{p}")),
            Err(e) => println!("\t{e:#}"),
        }
    }
}

/// Print the files of each requested package.
async fn list<F: Fetch>(index: &PackageIndex<F>, cli: &Cli) {
    for (i, package) in cli.files.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("List of files for: {package}");
        match index.file_list(&cli.suite, &cli.arch, package).await {
            Ok(files) => files.iter().for_each(|f| println!("\t{f}")),
            Err(e) => println!("\t{e:#}"),
        }
    }
}

/// Fetch every requested group, returning the names that could not be written.
async fn download_all<F: Fetch>(finder: &Finder<F>, cli: &Cli) -> Vec<String> {
    let dir = cli.download_dir();
    let mut failed = Vec::new();

    for (i, group) in group_file_names(&cli.files).iter().enumerate() {
        if i > 0 && !cli.quiet {
            println!();
        }
        if let Err(e) = download_group(finder, group, &dir, cli.quiet).await {
            println!("\tError: {e:#}");
            failed.extend(group.names.iter().cloned());
        }
    }

    failed
}

async fn download_group<F: Fetch>(
    finder: &Finder<F>,
    group: &FileGroup,
    dir: &Path,
    quiet: bool,
) -> Result<()> {
    let data = finder.fetch_group(group).await?;
    let written = output::write_outputs(dir, &group.names, &data).await?;

    if !quiet {
        for path in &written {
            println!("\tWriting to {}", path.display());
        }
        println!("\tDone ({} bytes written)", data.len());
    }
    Ok(())
}
