//! tally-desktop library root.
//!
//! Re-exports the page orchestrator and its collaborators so that the
//! binary and integration tests drive the same code.

pub mod config;
pub mod page;
pub mod print;
pub mod sink;
pub mod state;

pub use page::{DownloadOutcome, PageOptions, Preview, TemplatePage};
pub use print::{HtmlFilePrinter, Printer};
pub use sink::{DownloadSink, FileDownloadSink};
pub use state::{NavigationState, Phase};
