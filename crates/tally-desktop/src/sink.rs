use std::path::{Path, PathBuf};

/// Destination for finished exports.
pub trait DownloadSink: Send + Sync {
    /// Store `bytes` under `file_name`. Returns where it ended up.
    fn deliver(&self, file_name: &str, bytes: &[u8]) -> eyre::Result<PathBuf>;
}

/// Writes downloads into a directory, replacing a same-named file.
#[derive(Debug, Clone)]
pub struct FileDownloadSink {
    dir: PathBuf,
}

impl FileDownloadSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for FileDownloadSink {
    fn deliver(&self, file_name: &str, bytes: &[u8]) -> eyre::Result<PathBuf> {
        let path = write_atomic(&self.dir, file_name, bytes)?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "download saved");
        Ok(path)
    }
}

/// Write via a hidden temp file and rename, so readers only ever see a
/// complete file. The temp file is removed on failure.
pub(crate) fn write_atomic(dir: &Path, file_name: &str, bytes: &[u8]) -> eyre::Result<PathBuf> {
    if Path::new(file_name).file_name().and_then(|n| n.to_str()) != Some(file_name) {
        return Err(eyre::eyre!("refusing to write outside {}: {file_name:?}", dir.display()));
    }
    std::fs::create_dir_all(dir)
        .map_err(|e| eyre::eyre!("failed to create {}: {e}", dir.display()))?;

    let path = dir.join(file_name);
    let tmp_path = dir.join(format!(".{file_name}.{}.part", uuid::Uuid::new_v4()));

    let written = std::fs::write(&tmp_path, bytes).and_then(|()| std::fs::rename(&tmp_path, &path));
    if let Err(e) = written {
        if let Err(cleanup) = std::fs::remove_file(&tmp_path)
            && cleanup.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(path = %tmp_path.display(), error = %cleanup, "failed to remove partial file");
        }
        return Err(eyre::eyre!("failed to write {}: {e}", path.display()));
    }
    Ok(path)
}
