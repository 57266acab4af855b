use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Write `data` to `dir/<name>` for every name, creating `dir` if needed.
///
/// Names are used as plain file names; anything with a path separator is
/// rejected so a request cannot write outside `dir`.
pub async fn write_outputs(dir: &Path, names: &[String], data: &[u8]) -> Result<Vec<PathBuf>> {
    if names.is_empty() {
        bail!("no files");
    }

    fs::create_dir_all(dir)
        .await
        .with_context(|| format!("failed to create {}", dir.display()))?;

    let mut written = Vec::with_capacity(names.len());
    for name in names {
        let file_name = Path::new(name);
        if file_name.file_name() != Some(file_name.as_os_str()) {
            bail!("'{}' is not a plain file name", name);
        }

        let dest = dir.join(file_name);
        let mut file = fs::File::create(&dest)
            .await
            .with_context(|| format!("failed to create {}", dest.display()))?;
        file.write_all(data).await?;
        file.flush().await?;
        written.push(dest);
    }

    Ok(written)
}
