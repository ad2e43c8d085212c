use tally_core::form::InvoiceView;

use super::Palette;
use super::common::{self, TableStyle, TotalsStyle};
use crate::builder::DocumentBuilder;
use crate::document::{Align, Color, TextStyle};

pub(super) fn draw(b: &mut DocumentBuilder, view: &InvoiceView, palette: &Palette) {
    let body = TextStyle::new(palette.family, 10.5, palette.ink);
    let label = body.sized(9.0).colored(palette.muted);
    let heading = body.bold().sized(9.0).colored(palette.accent);

    let left = b.left();
    let right = b.right();
    let half = b.content_width() / 2.0;

    b.line(left, "INVOICE", body.bold().sized(36.0).colored(palette.accent), Align::Left);
    b.advance(1.0);
    let y = b.cursor();
    b.rule(left, y, b.content_width(), 4.0, palette.ink);
    b.advance(6.0);

    let top = b.cursor();
    let seller = common::party_at(b, left, top, half - 5.0, "FROM", &view.seller, heading, body);
    let meta = common::meta_rows(
        b,
        left + half,
        right,
        top,
        &common::meta_fields(view),
        heading,
        body.bold(),
    );
    b.set_cursor(seller.max(meta) + 6.0);

    let top = b.cursor();
    let bill = common::party_at(b, left, top, half - 5.0, "BILL TO", &view.bill_to, heading, body);
    let ship = common::party_at(b, left + half, top, half - 5.0, "SHIP TO", &view.ship_to, heading, body);
    b.set_cursor(bill.max(ship) + 8.0);

    common::item_table(
        b,
        view,
        &TableStyle {
            header: body.bold().colored(Color::WHITE),
            header_fill: Some(palette.ink),
            body,
            details: label,
            rule: Some(palette.tint),
            stripe: None,
            labels: ["ITEM", "QTY", "PRICE", "TOTAL"],
        },
    );
    common::totals(
        b,
        view,
        &TotalsStyle {
            label,
            value: body.bold(),
            grand: body.bold().sized(16.0).colored(palette.accent),
            grand_fill: Some(palette.tint),
            width: 90.0,
        },
    );
    common::notes(b, view, heading, body);
}
