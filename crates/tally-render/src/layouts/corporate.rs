use tally_core::form::InvoiceView;

use super::Palette;
use super::common::{self, TableStyle, TotalsStyle};
use crate::builder::{style_ascent, DocumentBuilder};
use crate::document::{Align, Color, TextStyle};
use crate::metrics::line_height_mm;

const SIDEBAR_WIDTH: f32 = 6.0;

pub(super) fn draw(b: &mut DocumentBuilder, view: &InvoiceView, palette: &Palette) {
    let body = TextStyle::new(palette.family, 10.0, palette.ink);
    let label = body.sized(8.5).colored(palette.muted);
    let heading = body.bold().sized(9.0).colored(palette.accent);

    let height = b.size().height_mm;
    b.rect(0.0, 0.0, SIDEBAR_WIDTH, height, palette.accent);

    let left = b.left();
    let right = b.right();
    let half = b.content_width() / 2.0;

    let top = b.cursor();
    let name_style = body.bold().sized(16.0).colored(palette.accent);
    let company = view.seller.name.as_deref().unwrap_or_default();
    b.text(left, top + style_ascent(&name_style), common::fitted(company, half, &name_style), name_style, Align::Left);
    let mut y = top + line_height_mm(&name_style);
    for line in view.seller.lines().into_iter().skip(usize::from(view.seller.name.is_some())) {
        b.text(left, y + style_ascent(&label), common::fitted(line, half, &label), label, Align::Left);
        y += line_height_mm(&label);
    }

    // Boxed meta panel on the right.
    let title = body.bold().sized(14.0);
    let rows = common::meta_fields(view);
    let present = rows.iter().filter(|(_, v)| v.is_some()).count() as f32;
    let panel_height = line_height_mm(&title) + present * line_height_mm(&body) + 6.0;
    b.rect(left + half + 10.0, top - 2.0, half - 10.0, panel_height, palette.tint);
    b.text(right - 3.0, top + 1.0 + style_ascent(&title), "TAX INVOICE", title, Align::Right);
    let meta = common::meta_rows(
        b,
        left + half + 13.0,
        right - 3.0,
        top + 1.0 + line_height_mm(&title),
        &rows,
        label,
        body,
    );
    b.set_cursor(y.max(meta).max(top + panel_height) + 8.0);

    let top = b.cursor();
    let bill = common::party_at(b, left, top, half - 5.0, "Invoice To", &view.bill_to, heading, body);
    let ship = common::party_at(b, left + half, top, half - 5.0, "Deliver To", &view.ship_to, heading, body);
    b.set_cursor(bill.max(ship) + 6.0);

    common::item_table(
        b,
        view,
        &TableStyle {
            header: body.bold().colored(Color::WHITE),
            header_fill: Some(palette.accent),
            body,
            details: label,
            rule: Some(palette.tint),
            stripe: None,
            labels: ["Description", "Quantity", "Unit Price", "Line Total"],
        },
    );
    common::totals(
        b,
        view,
        &TotalsStyle {
            label,
            value: body,
            grand: body.bold().sized(12.0),
            grand_fill: Some(palette.tint),
            width: 85.0,
        },
    );
    common::notes(b, view, heading, body);

    b.ensure(8.0 + line_height_mm(&label));
    b.advance(6.0);
    b.divider(0.5, palette.accent);
    b.advance(2.0);
    b.line(left, "This is a computer generated invoice.", label, Align::Left);
}
