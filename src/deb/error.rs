use std::io;

/// An error that can occur when extracting a file from a package archive.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The payload ended without an entry matching any requested name.
    #[error("no files matched in archive (looked for: {})", .targets.join(", "))]
    NoMatch { targets: Vec<String> },

    /// A requested name led to a link whose target is itself a link.
    ///
    /// Only one hop is followed, so the archive held nothing that could be
    /// extracted under the requested names. This belongs to the same class
    /// as [`ExtractError::NoMatch`]: [`ExtractError::is_no_match`] is true
    /// for both, and callers that only care whether a file was found can
    /// treat them alike.
    #[error("'{name}' is a link to '{target}', only one level of links is followed")]
    UnresolvedLink { name: String, target: String },

    /// The container or payload is malformed, truncated or has no `data.tar.xz`.
    #[error("corrupt archive: {reason}")]
    CorruptArchive {
        reason: String,
        #[source]
        source: Option<io::Error>,
    },

    /// The source could not be rewound or the sink could not be written.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ExtractError {
    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        Self::CorruptArchive {
            reason: reason.into(),
            source: None,
        }
    }

    pub(crate) fn corrupt_io(reason: impl Into<String>, source: io::Error) -> Self {
        Self::CorruptArchive {
            reason: reason.into(),
            source: Some(source),
        }
    }

    /// True when the archive was readable but held nothing to extract,
    /// i.e. for [`ExtractError::NoMatch`] and [`ExtractError::UnresolvedLink`].
    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatch { .. } | Self::UnresolvedLink { .. })
    }
}
