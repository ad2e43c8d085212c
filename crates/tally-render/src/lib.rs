//! tally-render
//!
//! Lays an invoice record out on fixed-size pages using one of the
//! registered templates. The result is a display list that both the
//! on-screen preview and the PDF export paint.

pub mod builder;
pub mod charset;
pub mod document;
pub mod layouts;
pub mod metrics;
pub mod money;

use tally_core::form::{FormData, InvoiceView};
use tally_core::page::PageSize;
use tally_core::templates::{self, TemplateKind};

use builder::{DocumentBuilder, Margins};

pub use document::{Align, Color, Document, Element, FontFamily, FontWeight, Page, TextStyle};
pub use layouts::{palette, Palette};

const PAGE_MARGIN_MM: f32 = 15.0;

/// Render `form` with the template registered under `template_number`.
/// Unknown identifiers render the default template.
pub fn render(form: &FormData, template_number: u32) -> Document {
    let kind = match templates::get(template_number) {
        Some(template) => template.kind,
        None => {
            tracing::warn!(
                template_number,
                fallback = ?TemplateKind::DEFAULT,
                "unknown template requested, rendering default"
            );
            TemplateKind::DEFAULT
        }
    };
    render_kind(form, kind)
}

pub fn render_kind(form: &FormData, kind: TemplateKind) -> Document {
    render_view(&form.view(), kind)
}

pub fn render_view(view: &InvoiceView, kind: TemplateKind) -> Document {
    let margins = if kind.is_receipt() {
        layouts::RECEIPT_MARGINS
    } else {
        Margins::uniform(PAGE_MARGIN_MM)
    };
    let mut builder = DocumentBuilder::new(kind, PageSize::A4, margins);
    layouts::draw(kind, &mut builder, view);
    let document = builder.finish();

    tracing::debug!(
        ?kind,
        pages = document.page_count(),
        items = document.line_item_descriptions().len(),
        "document rendered"
    );
    document
}
