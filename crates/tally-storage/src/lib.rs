//! tally-storage
//!
//! Draft persistence. The page orchestrator is handed a [`DraftStore`] and
//! never touches the filesystem itself.

pub mod draft;
pub mod error;
pub mod file;
pub mod memory;

pub use draft::{decode_draft, encode_draft, DraftEnvelope, DraftStore, DRAFT_KEY};
pub use error::StorageError;
pub use file::FileDraftStore;
pub use memory::MemoryDraftStore;
