use std::sync::{Mutex, MutexGuard};

use tally_core::form::FormData;

use crate::draft::{decode_draft, encode_draft, DraftStore};
use crate::error::StorageError;

/// Draft slot held in memory as the serialized bytes a file store would
/// write, so decoding behaves the same.
#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    slot: Mutex<Option<Vec<u8>>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `raw` already in the slot, whatever it contains.
    pub fn with_raw(raw: impl Into<Vec<u8>>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
        }
    }

    pub fn has_draft(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Vec<u8>>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DraftStore for MemoryDraftStore {
    fn load(&self) -> Result<Option<FormData>, StorageError> {
        match self.lock().as_deref() {
            Some(raw) => Ok(Some(decode_draft(raw)?.form_data)),
            None => Ok(None),
        }
    }

    fn save(&self, form: &FormData) -> Result<(), StorageError> {
        let bytes = encode_draft(form)?;
        *self.lock() = Some(bytes);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.lock() = None;
        Ok(())
    }
}
