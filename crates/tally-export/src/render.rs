use serde::Serialize;
use tera::{Context, Tera};

use tally_core::form::{FormData, InvoiceView};
use tally_core::templates::{self, TemplateKind};
use tally_render::money::{format_money, format_quantity, summary_rows, SummaryRow};

use crate::error::ExportError;
use crate::naming;
use crate::styles::PrintTheme;

const PRINT_TEMPLATE_NAME: &str = "print.html";
const PRINT_TEMPLATE: &str = include_str!("../templates/print.html");

#[derive(Serialize)]
struct MetaRow<'a> {
    label: &'static str,
    value: &'a str,
}

#[derive(Serialize)]
struct PrintItem<'a> {
    description: &'a str,
    details: Option<&'a str>,
    quantity: String,
    price: String,
    amount: String,
}

#[derive(Serialize)]
struct PrintContext<'a> {
    title: String,
    heading: &'static str,
    receipt: bool,
    theme: PrintTheme,
    seller: Vec<&'a str>,
    bill_to: Vec<&'a str>,
    ship_to: Vec<&'a str>,
    meta: Vec<MetaRow<'a>>,
    items: Vec<PrintItem<'a>>,
    totals: Vec<SummaryRow>,
    notes: Option<&'a str>,
}

impl<'a> PrintContext<'a> {
    fn new(view: &'a InvoiceView, kind: TemplateKind) -> Self {
        let currency = view.currency.as_str();
        let money = |v: Option<f64>| v.map(|v| format_money(v, currency)).unwrap_or_default();

        let meta = [
            ("Invoice #", view.meta.number.as_deref()),
            ("Date", view.meta.date.as_deref()),
            ("Due Date", view.meta.due_date.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, value)| Some(MetaRow { label, value: value? }))
        .collect();

        let items = view
            .items
            .iter()
            .map(|item| PrintItem {
                description: &item.description,
                details: item.details.as_deref(),
                quantity: item.quantity.map(format_quantity).unwrap_or_default(),
                price: money(item.unit_price),
                amount: money(item.amount()),
            })
            .collect();

        Self {
            title: naming::document_title(view, kind),
            heading: match kind {
                TemplateKind::Corporate => "TAX INVOICE",
                TemplateKind::Minimal => "invoice",
                _ => "INVOICE",
            },
            receipt: kind.is_receipt(),
            theme: PrintTheme::for_template(kind),
            seller: view.seller.lines(),
            bill_to: view.bill_to.lines(),
            ship_to: view.ship_to.lines(),
            meta,
            items,
            totals: summary_rows(view),
            notes: view.notes.as_deref(),
        }
    }
}

/// Render the print surface: a self-contained A4 HTML page for the host's
/// native print dialog. It follows the template's palette but is not
/// guaranteed to match the PDF element for element.
pub fn render_print_html(form: &FormData, template_number: u32) -> Result<String, ExportError> {
    let kind = templates::resolve(template_number);
    let view = form.view();

    let mut tera = Tera::default();
    tera.add_raw_template(PRINT_TEMPLATE_NAME, PRINT_TEMPLATE)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let context = Context::from_serialize(PrintContext::new(&view, kind))
        .map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(PRINT_TEMPLATE_NAME, &context)?;
    tracing::debug!(?kind, bytes = rendered.len(), "print surface rendered");
    Ok(rendered)
}
