use std::io::{Read, Seek, SeekFrom, Write};

use tracing::debug;

use super::error::ExtractError;
use super::payload::{PayloadEntry, PayloadWalker};

/// Name of the member holding the installed filesystem tree.
pub const PAYLOAD_MEMBER: &str = "data.tar.xz";

/// One scan over the original names plus one over a link target.
const MAX_PASSES: usize = 2;

/// Outcome of a single pass over the container
enum Scan {
    Found(Vec<u8>),
    Redirect { name: String, target: String },
    Exhausted,
}

/// Extracts single files from a Debian package held in a seekable source.
pub struct DebExtractor<S> {
    source: S,
}

impl<S: Read + Seek> DebExtractor<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Copy the first payload file whose base name is one of `targets` into `sink`.
    ///
    /// Entries are considered in payload order, so the order of `targets`
    /// does not affect which file is picked. A matching symbolic link is
    /// followed once: the archive is rescanned with the link target as the
    /// only name. A link found during that second scan is not followed.
    ///
    /// The entry is decoded in full before anything reaches `sink`, so on
    /// any archive error `sink` is left untouched.
    ///
    /// # Returns
    ///
    /// The number of bytes written to `sink`.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::NoMatch`] when nothing matches.
    /// - [`ExtractError::UnresolvedLink`] when a link leads to another link.
    /// - [`ExtractError::CorruptArchive`] on malformed or truncated input, or
    ///   when the package has no `data.tar.xz` member.
    /// - [`ExtractError::Io`] when the source cannot be rewound or the sink
    ///   cannot be written.
    pub fn extract<T, W>(&mut self, targets: &[T], sink: &mut W) -> Result<u64, ExtractError>
    where
        T: AsRef<str>,
        W: Write + ?Sized,
    {
        let mut targets: Vec<String> = targets.iter().map(|t| t.as_ref().to_string()).collect();

        for pass in 1..=MAX_PASSES {
            match self.scan(&targets)? {
                Scan::Found(content) => {
                    sink.write_all(&content)?;
                    sink.flush()?;
                    return Ok(content.len() as u64);
                }
                Scan::Exhausted => return Err(ExtractError::NoMatch { targets }),
                Scan::Redirect { name, target } if pass < MAX_PASSES => {
                    debug!("{name} is a link to {target}, rescanning");
                    targets = vec![target];
                }
                Scan::Redirect { name, target } => {
                    return Err(ExtractError::UnresolvedLink { name, target });
                }
            }
        }

        Err(ExtractError::NoMatch { targets })
    }

    fn scan(&mut self, targets: &[String]) -> Result<Scan, ExtractError> {
        self.source.seek(SeekFrom::Start(0))?;
        let mut archive = ar::Archive::new(&mut self.source);
        let mut saw_payload = false;

        while let Some(member) = archive.next_entry() {
            let member =
                member.map_err(|e| ExtractError::corrupt_io("failed to read ar member", e))?;
            let name = member_name(member.header().identifier());
            if name != PAYLOAD_MEMBER {
                debug!("skipping member {name} ({} bytes)", member.header().size());
                continue;
            }
            saw_payload = true;

            let mut walker = PayloadWalker::new(member);
            let mut entries = walker.entries()?;
            while let Some(mut entry) = entries.next_entry()? {
                if !matches_target(&entry, targets) {
                    continue;
                }
                let name = entry.base_name().unwrap_or_default().to_string();

                if let Some(target) = entry.link_target.take() {
                    return Ok(Scan::Redirect { name, target });
                }

                debug!("extracting {}", entry.path.display());
                return read_entry(&mut entry).map(Scan::Found);
            }
        }

        if !saw_payload {
            return Err(ExtractError::corrupt(format!(
                "package has no {PAYLOAD_MEMBER} member"
            )));
        }
        Ok(Scan::Exhausted)
    }
}

/// Extract one file from the package in `source`; see [`DebExtractor::extract`].
pub fn extract_file<T, S, W>(targets: &[T], source: &mut S, sink: &mut W) -> Result<u64, ExtractError>
where
    T: AsRef<str>,
    S: Read + Seek,
    W: Write + ?Sized,
{
    DebExtractor::new(source).extract(targets, sink)
}

/// GNU ar terminates member names with '/'
fn member_name(identifier: &[u8]) -> String {
    let name = String::from_utf8_lossy(identifier);
    name.strip_suffix('/').unwrap_or(&name).to_string()
}

fn matches_target<R: Read>(entry: &PayloadEntry<'_, R>, targets: &[String]) -> bool {
    if !entry.kind.is_file_like() {
        return false;
    }
    entry
        .base_name()
        .is_some_and(|name| targets.iter().any(|t| t == name))
}

fn read_entry<R: Read>(entry: &mut PayloadEntry<'_, R>) -> Result<Vec<u8>, ExtractError> {
    let mut content = Vec::with_capacity(entry.size as usize);
    entry
        .read_to_end(&mut content)
        .map_err(|e| ExtractError::corrupt_io("failed to read entry content", e))?;
    Ok(content)
}
