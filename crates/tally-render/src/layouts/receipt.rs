//! Narrow till-receipt layout, centred on the page in a monospaced face.

use tally_core::form::InvoiceView;

use super::Palette;
use crate::builder::{style_ascent, DocumentBuilder, Margins};
use crate::document::{Align, TextStyle};
use crate::metrics::{line_height_mm, text_width_mm, wrap};
use crate::money::{format_money, format_quantity, summary_rows};

/// 80mm column centred on A4.
pub(crate) const MARGINS: Margins = Margins {
    top: 15.0,
    right: 65.0,
    bottom: 15.0,
    left: 65.0,
};

pub(super) fn draw(b: &mut DocumentBuilder, view: &InvoiceView, palette: &Palette) {
    let body = TextStyle::new(palette.family, 9.0, palette.ink);
    let small = body.sized(8.0).colored(palette.muted);
    let left = b.left();
    let center = left + b.content_width() / 2.0;
    let width = b.content_width();

    for (index, line) in view.seller.lines().into_iter().enumerate() {
        let style = if index == 0 { body.bold().sized(11.0) } else { small };
        for wrapped in wrap(line, width, &style) {
            b.line(center, wrapped, style, Align::Center);
        }
    }
    b.advance(2.0);
    b.line(center, "RECEIPT", body.bold(), Align::Center);
    dashes(b, &body);

    for (label, value) in [
        ("No.", view.meta.number.as_deref()),
        ("Date", view.meta.date.as_deref()),
    ] {
        if let Some(value) = value {
            pair(b, label, value, small);
        }
    }
    if let Some(customer) = view.bill_to.name.as_deref() {
        pair(b, "Customer", customer, small);
    }
    dashes(b, &body);

    for item in &view.items {
        for line in wrap(&item.description, width, &body) {
            b.line(left, line, body, Align::Left);
        }
        let mut detail = String::new();
        if let Some(qty) = item.quantity {
            detail.push_str(&format_quantity(qty));
        }
        if let Some(price) = item.unit_price {
            if !detail.is_empty() {
                detail.push_str(" x ");
            }
            detail.push_str(&format_money(price, &view.currency));
        }
        let amount = item
            .amount()
            .map(|a| format_money(a, &view.currency))
            .unwrap_or_default();
        pair(b, &format!("  {detail}"), &amount, body);
        b.record_line_item(&item.description);
    }
    dashes(b, &body);

    for row in summary_rows(view) {
        let style = if row.grand { body.bold().sized(10.0) } else { body };
        pair(b, &row.label, &row.value, style);
    }
    dashes(b, &body);

    if let Some(notes) = view.notes.as_deref() {
        for line in wrap(notes, width, &small) {
            b.line(center, line, small, Align::Center);
        }
    }
    b.line(center, "Thank you!", body, Align::Center);
}

fn pair(b: &mut DocumentBuilder, label: &str, value: &str, style: TextStyle) {
    let right = b.right();
    b.line(b.left(), label.trim_end(), style, Align::Left);
    // Back up to the baseline of the line just drawn, which may sit on a
    // fresh page.
    let baseline = b.cursor() - line_height_mm(&style) + style_ascent(&style);
    b.text(right, baseline, value, style, Align::Right);
}

fn dashes(b: &mut DocumentBuilder, style: &TextStyle) {
    let per_dash = text_width_mm("-", style);
    let count = (b.content_width() / per_dash).floor() as usize;
    b.line(b.left(), "-".repeat(count), *style, Align::Left);
}
