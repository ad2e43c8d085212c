//! tally-export
//!
//! PDF generation from rendered documents, plus the print-surface HTML.

pub mod error;
pub mod naming;
pub mod pdf;
pub mod render;
pub mod styles;

pub use pdf::{export_document, generate_pdf, render_pdf, PdfArtifact, PdfOptions};
pub use render::render_print_html;
