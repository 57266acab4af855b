//! Decoding and walking the `data.tar.xz` payload.

use std::io::{self, Read};
use std::path::PathBuf;

use tar::EntryType;
use xz2::read::XzDecoder;

use super::error::ExtractError;

/// Wrap the raw payload member in its decompressor.
///
/// Debian packages built since dpkg 1.17 default to xz; this is the only
/// scheme the payload is expected to use.
pub fn decoder<R: Read>(reader: R) -> XzDecoder<R> {
    XzDecoder::new(reader)
}

/// Kind of a filesystem record, reduced to what extraction cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Regular,
    HardLink,
    Symlink,
    Other,
}

impl EntryKind {
    fn from_tar(entry_type: EntryType) -> Self {
        match entry_type {
            EntryType::Regular | EntryType::Continuous => EntryKind::Regular,
            EntryType::Link => EntryKind::HardLink,
            EntryType::Symlink => EntryKind::Symlink,
            _ => EntryKind::Other,
        }
    }

    /// Whether an entry of this kind can stand for a requested file.
    pub fn is_file_like(self) -> bool {
        !matches!(self, EntryKind::Other)
    }
}

/// Walks the tar records inside a compressed payload stream.
pub struct PayloadWalker<R: Read> {
    archive: tar::Archive<XzDecoder<R>>,
}

impl<R: Read> PayloadWalker<R> {
    pub fn new(reader: R) -> Self {
        Self {
            archive: tar::Archive::new(decoder(reader)),
        }
    }

    pub fn entries(&mut self) -> Result<PayloadEntries<'_, R>, ExtractError> {
        let entries = self
            .archive
            .entries()
            .map_err(|e| ExtractError::corrupt_io("failed to open payload", e))?;
        Ok(PayloadEntries { entries })
    }
}

pub struct PayloadEntries<'a, R: Read> {
    entries: tar::Entries<'a, XzDecoder<R>>,
}

impl<'a, R: Read> PayloadEntries<'a, R> {
    /// Next record, or `Ok(None)` once the tar stream has ended.
    pub fn next_entry(&mut self) -> Result<Option<PayloadEntry<'a, R>>, ExtractError> {
        let entry = match self.entries.next() {
            None => return Ok(None),
            Some(Ok(entry)) => entry,
            Some(Err(e)) => return Err(ExtractError::corrupt_io("failed to read payload", e)),
        };

        let path = entry
            .path()
            .map_err(|e| ExtractError::corrupt_io("invalid entry path in payload", e))?
            .into_owned();
        let link_target = entry
            .link_name()
            .map_err(|e| ExtractError::corrupt_io("invalid link name in payload", e))?
            .map(|target| target.to_string_lossy().into_owned())
            .filter(|target| !target.is_empty());
        let kind = EntryKind::from_tar(entry.header().entry_type());
        let size = entry.size();

        Ok(Some(PayloadEntry {
            path,
            kind,
            link_target,
            size,
            content: entry,
        }))
    }
}

/// One filesystem record from the payload
pub struct PayloadEntry<'a, R: Read> {
    pub path: PathBuf,
    pub kind: EntryKind,
    /// Link name as stored in the record, `None` when empty
    pub link_target: Option<String>,
    /// Content length declared by the record header
    pub size: u64,
    content: tar::Entry<'a, XzDecoder<R>>,
}

impl<R: Read> PayloadEntry<'_, R> {
    /// Final path segment, e.g. `libz.so.1` for `./usr/lib/x86_64-linux-gnu/libz.so.1`
    pub fn base_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }
}

impl<R: Read> Read for PayloadEntry<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.content.read(buf)
    }
}
