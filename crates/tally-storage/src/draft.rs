use serde::{Deserialize, Serialize};
use serde_json::Value;
use tally_core::form::FormData;

use crate::error::StorageError;

/// Name of the single draft slot.
pub const DRAFT_KEY: &str = "formData";

/// Current envelope version. Bump this when changing the persisted shape;
/// each bump needs a step in [`migrate`].
const CURRENT_VERSION: u32 = 1;

/// Where the orchestrator reads and writes the in-progress record.
///
/// A draft is stale once the user starts a new document; callers clear it
/// at that point rather than letting the next load resurrect it.
pub trait DraftStore: Send + Sync {
    /// The persisted record, or `None` when nothing has been saved.
    fn load(&self) -> Result<Option<FormData>, StorageError>;

    fn save(&self, form: &FormData) -> Result<(), StorageError>;

    /// Forget the persisted record. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), StorageError>;
}

/// On-disk wrapper around a saved record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftEnvelope {
    pub version: u32,

    /// Unknown for drafts written before the envelope existed.
    #[serde(default)]
    pub saved_at: Option<jiff::Timestamp>,

    pub form_data: FormData,
}

impl DraftEnvelope {
    pub fn new(form_data: FormData) -> Self {
        Self {
            version: CURRENT_VERSION,
            saved_at: Some(jiff::Timestamp::now()),
            form_data,
        }
    }
}

pub fn encode_draft(form: &FormData) -> Result<Vec<u8>, StorageError> {
    let envelope = DraftEnvelope::new(form.clone());
    Ok(serde_json::to_vec_pretty(&envelope)?)
}

/// Parse a persisted draft, upgrading older shapes. Anything that cannot be
/// read as a record is reported as [`StorageError::Corrupt`].
pub fn decode_draft(raw: &[u8]) -> Result<DraftEnvelope, StorageError> {
    let json: Value = serde_json::from_slice(raw).map_err(StorageError::corrupt)?;
    if !json.is_object() {
        return Err(StorageError::corrupt("draft is not a JSON object"));
    }

    let version = on_disk_version(&json);
    let migrated = migrate(json, version)?;
    serde_json::from_value(migrated).map_err(StorageError::corrupt)
}

/// Bare records (no `formData` key) predate the envelope and count as v0.
fn on_disk_version(json: &Value) -> u32 {
    if json.get("formData").is_none() {
        return 0;
    }
    json.get("version")
        .and_then(Value::as_u64)
        .map_or(0, |v| u32::try_from(v).unwrap_or(u32::MAX))
}

fn migrate(json: Value, from_version: u32) -> Result<Value, StorageError> {
    if from_version > CURRENT_VERSION {
        return Err(StorageError::UnsupportedVersion {
            found: from_version,
            supported: CURRENT_VERSION,
        });
    }

    let mut json = json;

    // v0 → v1: wrap the bare record.
    if from_version < 1 {
        json = serde_json::json!({
            "version": 1,
            "savedAt": null,
            "formData": json,
        });
        tracing::info!("migrated draft v0 → v1 (wrapped bare record)");
    }

    Ok(json)
}
