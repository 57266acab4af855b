//! Grouping of requested file names.
//!
//! Shared libraries are usually requested under several names at once
//! (`libfoo.so`, `libfoo.so.5`, `libfoo.so.5.11.3`). Names that only differ
//! in their `.so` version suffix are served by the same package, so they are
//! looked up and extracted together.

use std::sync::LazyLock;

use regex::Regex;

static SO_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.so(\.\d+)*$").unwrap());

/// Requested names sharing one stem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup {
    pub stem: String,
    /// Longest (most specific) name first
    pub names: Vec<String>,
}

/// Strip a trailing `.so` and any numeric version components after it.
pub fn stem(name: &str) -> &str {
    match SO_SUFFIX.find(name) {
        Some(m) => &name[..m.start()],
        None => name,
    }
}

/// Group `names` by stem, keeping groups in first-seen order.
pub fn group_file_names<S: AsRef<str>>(names: &[S]) -> Vec<FileGroup> {
    let mut groups: Vec<FileGroup> = Vec::new();

    for name in names {
        let name = name.as_ref();
        let key = stem(name);
        match groups.iter_mut().find(|g| g.stem == key) {
            Some(group) => group.names.push(name.to_string()),
            None => groups.push(FileGroup {
                stem: key.to_string(),
                names: vec![name.to_string()],
            }),
        }
    }

    for group in &mut groups {
        group.names.sort_by(|a, b| b.len().cmp(&a.len()));
    }

    groups
}
