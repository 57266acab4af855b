use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::filter::LevelFilter;

use crate::index::DEFAULT_INDEX_URL;

#[derive(Parser, Debug)]
#[command(name = "finddeb")]
#[command(version)]
#[command(
    about = "Download files with the same names in the packages of the selected arch and suite from Debian (https://packages.debian.org/)",
    long_about = None
)]
#[command(after_help = "Examples:\n  \
  finddeb libQt5Gui.so.5                      download libQt5Gui.so.5 into buster-armhf/\n  \
  finddeb --suite bullseye --arch arm64 libz.so.1 libz.so\n  \
  finddeb --search libwrap.so.0               list packages shipping libwrap.so.0\n  \
  finddeb --ls libwrap0                       list files of package libwrap0")]
pub struct Cli {
    /// File names to download (package names with --ls)
    #[arg(value_name = "FILE NAMES")]
    pub files: Vec<String>,

    /// Suite: jessie, stretch, buster, bullseye, sid ...
    #[arg(long, default_value = "buster")]
    pub suite: String,

    /// Architecture: amd64, arm64, armel, armhf, i386 ...
    #[arg(long, default_value = "armhf")]
    pub arch: String,

    /// Architecture for search, can be 'any' (default: same as --arch)
    #[arg(long = "arch4search", value_name = "ARCH")]
    pub search_arch: Option<String>,

    /// Search packages by file name
    #[arg(long, conflicts_with = "list")]
    pub search: bool,

    /// Get file lists of packages
    #[arg(long = "ls")]
    pub list: bool,

    /// Directory for downloaded files (default: <suite>-<arch>)
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Prefer mirror that contains this string
    #[arg(long, default_value = "ftp.debian.org")]
    pub mirror: String,

    /// Base URL of the package index website
    #[arg(long, value_name = "URL", default_value = DEFAULT_INDEX_URL)]
    pub index_url: url::Url,

    /// Timeout for a single HTTP request, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 300)]
    pub timeout: u64,

    /// Attempts per HTTP request on timeouts and connection errors
    #[arg(long, default_value_t = 10)]
    pub retries: u32,

    /// Quiet mode, only print errors
    #[arg(short = 'q')]
    pub quiet: bool,

    /// Log more (-vv for trace output)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn search_arch(&self) -> &str {
        self.search_arch.as_deref().unwrap_or(&self.arch)
    }

    pub fn download_dir(&self) -> PathBuf {
        self.dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}-{}", self.suite, self.arch)))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::ERROR;
        }
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}
