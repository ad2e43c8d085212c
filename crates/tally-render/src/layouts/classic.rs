use tally_core::form::InvoiceView;

use super::Palette;
use super::common::{self, TableStyle, TotalsStyle};
use crate::builder::{style_ascent, DocumentBuilder};
use crate::document::{Align, TextStyle};
use crate::metrics::line_height_mm;

pub(super) fn draw(b: &mut DocumentBuilder, view: &InvoiceView, palette: &Palette) {
    let body = TextStyle::new(palette.family, 10.0, palette.ink);
    let label = body.sized(9.0).colored(palette.muted);
    let title = body.bold().sized(24.0).colored(palette.accent);

    let (left, right) = (b.left(), b.right());
    let half = b.content_width() / 2.0;

    let top = b.cursor();
    let seller_bottom =
        common::party_at(b, left, top, half - 5.0, "From", &view.seller, label.bold(), body);
    b.text(right, top + style_ascent(&title), "INVOICE", title, Align::Right);
    let meta_top = top + line_height_mm(&title) + 2.0;
    let meta_bottom = common::meta_rows(
        b,
        right - 70.0,
        right,
        meta_top,
        &common::meta_fields(view),
        label,
        body,
    );
    b.set_cursor(seller_bottom.max(meta_bottom) + 6.0);
    b.divider(0.8, palette.accent);
    b.advance(5.0);

    let top = b.cursor();
    let bill = common::party_at(b, left, top, half - 5.0, "Bill To", &view.bill_to, label.bold(), body);
    let ship = common::party_at(
        b,
        left + half,
        top,
        half - 5.0,
        "Ship To",
        &view.ship_to,
        label.bold(),
        body,
    );
    b.set_cursor(bill.max(ship) + 6.0);

    common::item_table(
        b,
        view,
        &TableStyle {
            header: body.bold(),
            header_fill: Some(palette.tint),
            body,
            details: label,
            rule: Some(palette.tint),
            stripe: None,
            labels: ["Item", "Qty", "Price", "Amount"],
        },
    );
    common::totals(
        b,
        view,
        &TotalsStyle {
            label,
            value: body,
            grand: body.bold().sized(12.0),
            grand_fill: None,
            width: 80.0,
        },
    );
    common::notes(b, view, label.bold(), body);

    b.advance(8.0);
    let center = left + b.content_width() / 2.0;
    b.line(center, "Thank you for your business!", label, Align::Center);
}
