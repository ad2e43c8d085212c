use std::path::{Path, PathBuf};

use tally_core::form::FormData;

use crate::draft::{decode_draft, encode_draft, DraftStore, DRAFT_KEY};
use crate::error::StorageError;

/// Draft slot kept as `formData.json` inside a data directory.
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    dir: PathBuf,
}

impl FileDraftStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{DRAFT_KEY}.json"))
    }
}

impl DraftStore for FileDraftStore {
    fn load(&self) -> Result<Option<FormData>, StorageError> {
        let path = self.path();
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::io(path, e)),
        };
        let envelope = decode_draft(&bytes)?;
        tracing::debug!(path = %path.display(), version = envelope.version, "draft loaded");
        Ok(Some(envelope.form_data))
    }

    fn save(&self, form: &FormData) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;

        let path = self.path();
        let bytes = encode_draft(form)?;

        // Write to a temp file then rename so a crash never leaves half a draft.
        let tmp_path = self.dir.join(format!("{DRAFT_KEY}.json.tmp"));
        std::fs::write(&tmp_path, &bytes).map_err(|e| StorageError::io(&tmp_path, e))?;
        std::fs::rename(&tmp_path, &path).map_err(|e| StorageError::io(&path, e))?;

        tracing::debug!(path = %path.display(), bytes = bytes.len(), "draft saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let path = self.path();
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "draft cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }
}
