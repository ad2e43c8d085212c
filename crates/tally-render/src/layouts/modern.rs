use tally_core::form::InvoiceView;

use super::Palette;
use super::common::{self, TableStyle, TotalsStyle};
use crate::builder::{style_ascent, DocumentBuilder};
use crate::document::{Align, Color, TextStyle};
use crate::metrics::line_height_mm;

const BAND_HEIGHT: f32 = 38.0;

pub(super) fn draw(b: &mut DocumentBuilder, view: &InvoiceView, palette: &Palette) {
    let body = TextStyle::new(palette.family, 10.0, palette.ink);
    let label = body.sized(8.5).colored(palette.muted);
    let on_band = body.colored(Color::WHITE);

    // Full-bleed band across the top of the first page.
    let width = b.size().width_mm;
    b.rect(0.0, 0.0, width, BAND_HEIGHT, palette.accent);

    let (left, right) = (b.left(), b.right());
    let title = on_band.bold().sized(26.0);
    b.text(left, 18.0, "Invoice", title, Align::Left);
    if let Some(name) = view.seller.name.as_deref() {
        let name = common::fitted(name, 90.0, &on_band.bold().sized(12.0));
        b.text(right, 15.0, name, on_band.bold().sized(12.0), Align::Right);
    }
    let mut y = 21.0;
    for line in view.seller.lines().into_iter().skip(usize::from(view.seller.name.is_some())) {
        b.text(right, y, common::fitted(line, 90.0, &on_band.sized(8.5)), on_band.sized(8.5), Align::Right);
        y += line_height_mm(&on_band.sized(8.5));
        if y > BAND_HEIGHT - 2.0 {
            break;
        }
    }
    b.set_cursor(BAND_HEIGHT + 8.0);

    let top = b.cursor();
    let third = b.content_width() / 3.0;
    let bill = common::party_at(b, left, top, third - 4.0, "BILLED TO", &view.bill_to, label.bold(), body);
    let ship = common::party_at(
        b,
        left + third,
        top,
        third - 4.0,
        "SHIPPED TO",
        &view.ship_to,
        label.bold(),
        body,
    );
    let meta_label = label.bold().colored(palette.accent);
    b.text(left + 2.0 * third, top + style_ascent(&meta_label), "DETAILS", meta_label, Align::Left);
    let meta = common::meta_rows(
        b,
        left + 2.0 * third,
        right,
        top + line_height_mm(&meta_label),
        &common::meta_fields(view),
        label,
        body,
    );
    b.set_cursor(bill.max(ship).max(meta) + 8.0);

    common::item_table(
        b,
        view,
        &TableStyle {
            header: body.bold().colored(Color::WHITE),
            header_fill: Some(palette.accent),
            body,
            details: label,
            rule: None,
            stripe: Some(palette.tint),
            labels: ["Description", "Qty", "Rate", "Amount"],
        },
    );
    common::totals(
        b,
        view,
        &TotalsStyle {
            label,
            value: body,
            grand: body.bold().sized(12.0).colored(Color::WHITE),
            grand_fill: Some(palette.accent),
            width: 75.0,
        },
    );
    common::notes(b, view, meta_label, body);
}
