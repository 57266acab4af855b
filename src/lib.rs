//! # finddeb
//!
//! Download single files from Debian binary packages, driven only by the
//! file's name.
//!
//! Cross-compiling for or poking at an embedded Linux system often needs one
//! shared library out of a distro package, without a package manager or a
//! root filesystem at hand. This crate finds the package that ships a file
//! through packages.debian.org, downloads the `.deb` into memory and reads
//! the one file out of its `data.tar.xz` payload.
//!
//! ## Features
//!
//! - Search packages by contained file name, suite and architecture
//! - List the files of a package
//! - Pick a download mirror by preference
//! - Extract a file from a `.deb`, following one level of symbolic links
//!
//! ## Example
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::Cursor;
//!
//! fn main() -> anyhow::Result<()> {
//!     let archive = std::fs::read("libwrap0_7.6.q-28_armhf.deb")?;
//!     let mut source = Cursor::new(archive);
//!
//!     let mut out = File::create("libwrap.so.0")?;
//!     let written = finddeb::deb::extract_file(&["libwrap.so.0"], &mut source, &mut out)?;
//!     println!("{written} bytes");
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod deb;
pub mod finder;
pub mod index;
pub mod io;
pub mod output;
pub mod request;

pub use cli::Cli;
pub use deb::{DebExtractor, ExtractError, extract_file};
pub use finder::{Finder, FinderOptions};
pub use index::PackageIndex;
pub use io::{Fetch, HttpFetcher};
