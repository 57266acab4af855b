//! Debian package decoding and single-file extraction.
//!
//! ## Package Layout
//!
//! A binary package is an `ar` archive whose members are:
//! 1. `debian-binary` - the format version
//! 2. `control.tar.*` - maintainer scripts and metadata
//! 3. `data.tar.xz` - the files installed on the target system
//!
//! Extraction only ever decodes the third member. The filesystem tree inside
//! it is walked front to back and the first regular file, hard link or
//! symbolic link whose base name is requested is read out in full, then
//! handed to the caller's sink.
//!
//! ## Architecture
//!
//! - [`payload`]: xz decoding and tar record walking
//! - [`extractor`]: `ar` member scan, target matching and link redirection
//!
//! ## Limitations
//!
//! - Only `data.tar.xz` payloads (no gzip, bzip2 or zstd)
//! - A link is followed at most once

mod error;
mod extractor;
mod payload;

pub use error::ExtractError;
pub use extractor::{DebExtractor, PAYLOAD_MEMBER, extract_file};
pub use payload::{EntryKind, PayloadEntries, PayloadEntry, PayloadWalker};
