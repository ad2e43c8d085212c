use tally_core::form::InvoiceView;

use super::Palette;
use super::common::{self, TableStyle, TotalsStyle};
use crate::builder::DocumentBuilder;
use crate::document::{Align, TextStyle};

pub(super) fn draw(b: &mut DocumentBuilder, view: &InvoiceView, palette: &Palette) {
    let body = TextStyle::new(palette.family, 9.5, palette.ink);
    let label = body.sized(8.0).colored(palette.muted);

    let left = b.left();
    let right = b.right();
    let half = b.content_width() / 2.0;

    b.line(left, "invoice", body.sized(18.0).colored(palette.muted), Align::Left);
    if let Some(number) = view.meta.number.as_deref() {
        b.line(left, format!("no. {number}"), label, Align::Left);
    }
    b.advance(6.0);

    let top = b.cursor();
    let seller = common::party_at(b, left, top, half - 5.0, "from", &view.seller, label, body);
    let dates = [
        ("date", view.meta.date.as_deref()),
        ("due", view.meta.due_date.as_deref()),
    ];
    let meta = common::meta_rows(b, left + half, right, top, &dates, label, body);
    b.set_cursor(seller.max(meta) + 6.0);

    let top = b.cursor();
    let bill = common::party_at(b, left, top, half - 5.0, "to", &view.bill_to, label, body);
    let ship = common::party_at(b, left + half, top, half - 5.0, "ship to", &view.ship_to, label, body);
    b.set_cursor(bill.max(ship) + 10.0);

    common::item_table(
        b,
        view,
        &TableStyle {
            header: label,
            header_fill: None,
            body,
            details: label,
            rule: Some(palette.accent),
            stripe: None,
            labels: ["item", "qty", "price", "amount"],
        },
    );
    common::totals(
        b,
        view,
        &TotalsStyle {
            label,
            value: body,
            grand: body.bold(),
            grand_fill: None,
            width: 70.0,
        },
    );
    common::notes(b, view, label, body);
}
