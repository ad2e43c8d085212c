//! tally-core
//!
//! Pure domain types for the invoice generator: the opaque form record,
//! its lenient invoice projection, the template registry, page geometry
//! and the scale-to-fit calculator. No rendering or IO lives here.

pub mod error;
pub mod form;
pub mod page;
pub mod scale;
pub mod templates;

pub use form::{FormData, InvoiceMeta, InvoiceView, LineItem, Party, Totals};
pub use templates::{TemplateDescriptor, TemplateInfo, TemplateKind};
