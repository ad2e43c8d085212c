use tally_core::form::InvoiceView;
use tally_core::templates::TemplateKind;

fn stem(kind: TemplateKind) -> &'static str {
    if kind.is_receipt() { "receipt" } else { "invoice" }
}

/// Download file name: `invoice-<number>.pdf` / `receipt-<number>.pdf`, or
/// the bare stem when the record has no usable number.
pub fn export_file_name(view: &InvoiceView, kind: TemplateKind) -> String {
    let stem = stem(kind);
    let number = view
        .meta
        .number
        .as_deref()
        .map(slug::slugify)
        .filter(|s| !s.is_empty());
    match number {
        Some(number) => format!("{stem}-{number}.pdf"),
        None => format!("{stem}.pdf"),
    }
}

/// Document title embedded in the PDF metadata.
pub fn document_title(view: &InvoiceView, kind: TemplateKind) -> String {
    let label = if kind.is_receipt() { "Receipt" } else { "Invoice" };
    match view.meta.number.as_deref() {
        Some(number) => format!("{label} {number}"),
        None => label.to_string(),
    }
}
