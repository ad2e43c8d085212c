use lopdf::content::Content;
use lopdf::{Document as PdfFile, Object};
use serde_json::json;
use tally_core::form::FormData;
use tally_core::templates::{self, TemplateKind};
use tally_export::naming::export_file_name;
use tally_export::{export_document, generate_pdf};

fn form(value: serde_json::Value) -> FormData {
    FormData::from_value(value).unwrap()
}

/// Decompressed content stream of every page, in page order.
fn page_streams(bytes: &[u8]) -> Vec<Vec<u8>> {
    let pdf = PdfFile::load_mem(bytes).unwrap();
    pdf.get_pages()
        .values()
        .map(|&page_id| pdf.get_page_content(page_id).unwrap())
        .collect()
}

/// Strings drawn on every page. The base fonts use WinAnsi, which agrees
/// with Latin-1 for the characters these tests print.
fn page_texts(bytes: &[u8]) -> Vec<Vec<String>> {
    page_streams(bytes)
        .iter()
        .map(|stream| {
            Content::decode(stream)
                .unwrap()
                .operations
                .iter()
                .filter(|op| op.operator == "Tj" || op.operator == "TJ")
                .flat_map(|op| op.operands.iter().filter_map(shown_text))
                .collect()
        })
        .collect()
}

fn shown_text(operand: &Object) -> Option<String> {
    match operand {
        Object::String(bytes, _) => Some(bytes.iter().map(|&b| char::from(b)).collect()),
        Object::Array(parts) => Some(parts.iter().filter_map(shown_text).collect()),
        _ => None,
    }
}

#[test]
fn widget_invoice_exports_a_single_page_pdf() {
    let data = form(json!({
        "items": [{ "desc": "Widget", "qty": 2, "price": 5 }],
        "total": 10
    }));

    let artifact = generate_pdf(&data, 1).unwrap();
    assert!(artifact.bytes.starts_with(b"%PDF"));
    assert_eq!(artifact.page_count, 1);
    assert_eq!(artifact.file_name, "invoice.pdf");
}

#[test]
fn every_template_exports() {
    let data = form(json!({
        "yourCompany": { "name": "Tally Co" },
        "billTo": { "name": "Acme" },
        "invoice": { "number": "INV-9" },
        "items": [{ "name": "Support", "quantity": 1, "amount": 99.5 }],
        "selectedCurrency": "EUR"
    }));
    for template in templates::templates() {
        let artifact = generate_pdf(&data, template.identifier).unwrap();
        assert!(artifact.bytes.starts_with(b"%PDF"), "{}", template.name);
        assert!(!artifact.bytes.is_empty());
    }
}

#[test]
fn unknown_template_still_exports() {
    let data = form(json!({ "items": [{ "name": "Thing" }] }));
    let artifact = generate_pdf(&data, 1234).unwrap();
    assert!(artifact.bytes.starts_with(b"%PDF"));
}

#[test]
fn exported_page_count_follows_the_preview_document() {
    let items: Vec<_> = (0..150)
        .map(|i| json!({ "name": format!("Line {i}"), "quantity": 1, "amount": 1 }))
        .collect();
    let data = form(json!({ "items": items }));

    let preview = tally_render::render(&data, 2);
    let artifact = export_document(&preview, &data.view()).unwrap();
    assert!(preview.page_count() > 1);
    assert_eq!(artifact.page_count, preview.page_count());
}

#[test]
fn exported_pages_show_the_items_and_totals() {
    let data = form(json!({
        "items": [{ "desc": "Widget", "qty": 2, "price": 5 }],
        "total": 10
    }));
    let artifact = generate_pdf(&data, 1).unwrap();
    let pages = page_texts(&artifact.bytes);

    assert_eq!(pages.len(), 1);
    for expected in ["Widget", "2", "5.00", "10.00", "Total"] {
        assert!(pages[0].iter().any(|t| t == expected), "missing {expected:?}");
    }
}

#[test]
fn exported_text_matches_the_preview() {
    let data = form(json!({
        "yourCompany": { "name": "Tally Co" },
        "items": [
            { "name": "Caf\u{e9} au lait", "quantity": 3, "amount": 2 },
            { "name": "\u{0421}\u{0447}\u{0451}\u{0442}", "quantity": 1, "amount": 4 }
        ]
    }));
    for template in templates::templates() {
        let preview = tally_render::render(&data, template.identifier);
        let artifact = export_document(&preview, &data.view()).unwrap();
        let pages = page_texts(&artifact.bytes);

        let shown: Vec<Vec<String>> = preview
            .pages()
            .iter()
            .map(|page| page.texts().map(str::to_string).collect())
            .collect();
        assert_eq!(pages, shown, "template {}", template.name);
        assert!(pages.concat().iter().any(|t| t == "Caf\u{e9} au lait"));
        assert!(pages.concat().iter().any(|t| t == "????"));
    }
}

#[test]
fn repeated_export_has_the_same_content() {
    let data = form(json!({
        "items": [{ "name": "A", "quantity": 3, "amount": 4 }],
        "invoice": { "number": "7" }
    }));
    let first = generate_pdf(&data, 3).unwrap();
    let second = generate_pdf(&data, 3).unwrap();

    assert_eq!(first.file_name, second.file_name);
    assert_eq!(first.page_count, second.page_count);
    assert_eq!(page_streams(&first.bytes), page_streams(&second.bytes));
}

#[test]
fn file_names_are_sanitised() {
    let view = form(json!({ "invoice": { "number": "INV 2024/05#1" } })).view();
    assert_eq!(
        export_file_name(&view, TemplateKind::Classic),
        "invoice-inv-2024-05-1.pdf"
    );

    let receipt = form(json!({ "receiptNumber": "R-77" })).view();
    assert_eq!(export_file_name(&receipt, TemplateKind::Receipt), "receipt-r-77.pdf");

    let unusable = form(json!({ "invoiceNumber": "///" })).view();
    assert_eq!(export_file_name(&unusable, TemplateKind::Modern), "invoice.pdf");
}
