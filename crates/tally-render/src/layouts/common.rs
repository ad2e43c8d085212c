//! Building blocks shared by the layouts: party blocks, label/value rows,
//! the paginated item table, the totals block and notes.

use tally_core::form::{InvoiceView, Party};

use crate::builder::{style_ascent, DocumentBuilder};
use crate::document::{Align, Color, TextStyle};
use crate::metrics::{line_height_mm, text_width_mm, truncate_to_width, wrap};
use crate::money::{format_money, format_quantity, summary_rows};

const CELL_PAD: f32 = 2.0;

/// Draw a titled party block with its top at `y`. Returns the bottom edge.
/// An empty party draws nothing and returns `y`.
#[allow(clippy::too_many_arguments)]
pub(crate) fn party_at(
    b: &mut DocumentBuilder,
    x: f32,
    y: f32,
    width: f32,
    heading: &str,
    party: &Party,
    heading_style: TextStyle,
    body_style: TextStyle,
) -> f32 {
    if party.is_empty() {
        return y;
    }
    let mut top = y;
    b.text(x, top + style_ascent(&heading_style), heading, heading_style, Align::Left);
    top += line_height_mm(&heading_style);

    for (index, line) in party.lines().into_iter().enumerate() {
        let style = if index == 0 && party.name.is_some() {
            body_style.bold()
        } else {
            body_style
        };
        for wrapped in wrap(line, width, &style) {
            b.text(x, top + style_ascent(&style), wrapped, style, Align::Left);
            top += line_height_mm(&style);
        }
    }
    top
}

/// Label/value rows with the values right-aligned at `value_right`. Rows
/// whose value is absent are skipped. Returns the bottom edge.
#[allow(clippy::too_many_arguments)]
pub(crate) fn meta_rows(
    b: &mut DocumentBuilder,
    label_x: f32,
    value_right: f32,
    y: f32,
    rows: &[(&str, Option<&str>)],
    label_style: TextStyle,
    value_style: TextStyle,
) -> f32 {
    let mut top = y;
    for (label, value) in rows {
        let Some(value) = value else { continue };
        let baseline = top + style_ascent(&value_style);
        b.text(label_x, baseline, *label, label_style, Align::Left);
        b.text(value_right, baseline, *value, value_style, Align::Right);
        top += line_height_mm(&value_style);
    }
    top
}

pub(crate) struct TableStyle {
    pub header: TextStyle,
    pub header_fill: Option<Color>,
    pub body: TextStyle,
    pub details: TextStyle,
    pub rule: Option<Color>,
    pub stripe: Option<Color>,
    pub labels: [&'static str; 4],
}

struct Columns {
    desc_x: f32,
    desc_width: f32,
    qty_right: f32,
    price_right: f32,
    amount_right: f32,
}

impl Columns {
    fn for_builder(b: &DocumentBuilder) -> Self {
        let right = b.right();
        Self {
            desc_x: b.left() + CELL_PAD,
            desc_width: b.content_width() - 78.0 - CELL_PAD,
            qty_right: right - 62.0,
            price_right: right - 32.0,
            amount_right: right - CELL_PAD,
        }
    }
}

fn table_header(b: &mut DocumentBuilder, cols: &Columns, style: &TableStyle) {
    let height = line_height_mm(&style.header) + 2.0 * CELL_PAD;
    b.ensure(height);
    let top = b.cursor();
    if let Some(fill) = style.header_fill {
        b.rect(b.left(), top, b.content_width(), height, fill);
    }
    let baseline = top + CELL_PAD + style_ascent(&style.header);
    let [desc, qty, price, amount] = style.labels;
    b.text(cols.desc_x, baseline, desc, style.header, Align::Left);
    b.text(cols.qty_right, baseline, qty, style.header, Align::Right);
    b.text(cols.price_right, baseline, price, style.header, Align::Right);
    b.text(cols.amount_right, baseline, amount, style.header, Align::Right);
    b.advance(height);
    if let Some(rule) = style.rule {
        b.divider(0.8, rule);
    }
}

/// The item table. Rows never split across pages; the header repeats on
/// every page the table continues onto. Every item in `view` gets a row.
pub(crate) fn item_table(b: &mut DocumentBuilder, view: &InvoiceView, style: &TableStyle) {
    let cols = Columns::for_builder(b);
    table_header(b, &cols, style);

    let body_lh = line_height_mm(&style.body);
    let details_lh = line_height_mm(&style.details);

    for (index, item) in view.items.iter().enumerate() {
        let mut desc_lines = wrap(&item.description, cols.desc_width, &style.body);
        if desc_lines.is_empty() {
            desc_lines.push(String::new());
        }
        let detail_lines = item
            .details
            .as_deref()
            .map(|d| wrap(d, cols.desc_width, &style.details))
            .unwrap_or_default();
        let row_height = desc_lines.len() as f32 * body_lh
            + detail_lines.len() as f32 * details_lh
            + 2.0 * CELL_PAD;

        if b.ensure(row_height) {
            table_header(b, &cols, style);
        }

        let top = b.cursor();
        if let Some(stripe) = style.stripe
            && index % 2 == 1
        {
            b.rect(b.left(), top, b.content_width(), row_height, stripe);
        }

        let first_baseline = top + CELL_PAD + style_ascent(&style.body);
        let mut baseline = first_baseline;
        for line in desc_lines {
            b.text(cols.desc_x, baseline, line, style.body, Align::Left);
            baseline += body_lh;
        }
        for line in detail_lines {
            b.text(cols.desc_x, baseline, line, style.details, Align::Left);
            baseline += details_lh;
        }

        if let Some(qty) = item.quantity {
            b.text(cols.qty_right, first_baseline, format_quantity(qty), style.body, Align::Right);
        }
        if let Some(price) = item.unit_price {
            b.text(
                cols.price_right,
                first_baseline,
                format_money(price, &view.currency),
                style.body,
                Align::Right,
            );
        }
        if let Some(amount) = item.amount() {
            b.text(
                cols.amount_right,
                first_baseline,
                format_money(amount, &view.currency),
                style.body,
                Align::Right,
            );
        }

        b.set_cursor(top + row_height);
        if let Some(rule) = style.rule {
            b.divider(0.3, rule);
        }
        b.record_line_item(&item.description);
    }
}

pub(crate) struct TotalsStyle {
    pub label: TextStyle,
    pub value: TextStyle,
    pub grand: TextStyle,
    pub grand_fill: Option<Color>,
    pub width: f32,
}

/// Subtotal, tax and total rows, right-aligned. Rows with no figure are
/// omitted; nothing is drawn when the record has no amounts at all.
pub(crate) fn totals(b: &mut DocumentBuilder, view: &InvoiceView, style: &TotalsStyle) {
    let rows = summary_rows(view);
    if rows.is_empty() {
        return;
    }

    let height: f32 = rows
        .iter()
        .map(|row| {
            let s = if row.grand { &style.grand } else { &style.value };
            line_height_mm(s) + 1.0
        })
        .sum::<f32>()
        + 2.0 * CELL_PAD;
    b.ensure(height);
    b.advance(CELL_PAD);

    let left = b.right() - style.width;
    let value_right = b.right() - CELL_PAD;
    for row in rows {
        let (label_style, value_style) = if row.grand {
            (style.grand, style.grand)
        } else {
            (style.label, style.value)
        };
        let row_height = line_height_mm(&value_style) + 1.0;
        let top = b.cursor();
        if row.grand && let Some(fill) = style.grand_fill {
            b.rect(left, top, style.width, row_height, fill);
        }
        let baseline = top + 0.5 + style_ascent(&value_style);
        b.text(left + CELL_PAD, baseline, row.label, label_style, Align::Left);
        b.text(value_right, baseline, row.value, value_style, Align::Right);
        b.advance(row_height);
    }
    b.advance(CELL_PAD);
}

/// Optional notes paragraph under a heading.
pub(crate) fn notes(b: &mut DocumentBuilder, view: &InvoiceView, heading: TextStyle, body: TextStyle) {
    let Some(notes) = view.notes.as_deref() else {
        return;
    };
    let first_line = line_height_mm(&heading) + line_height_mm(&body);
    b.ensure(first_line);
    b.advance(3.0);
    let x = b.left();
    let width = b.content_width();
    b.line(x, "Notes", heading, Align::Left);
    b.paragraph(x, width, notes, body);
}

/// Single line that must fit in `width`, shortened if necessary.
pub(crate) fn fitted(text: &str, width: f32, style: &TextStyle) -> String {
    if text_width_mm(text, style) <= width {
        text.to_string()
    } else {
        truncate_to_width(text, width, style)
    }
}

/// "Invoice #", "Date", "Due Date" rows, in that order.
pub(crate) fn meta_fields(view: &InvoiceView) -> [(&'static str, Option<&str>); 3] {
    [
        ("Invoice #", view.meta.number.as_deref()),
        ("Date", view.meta.date.as_deref()),
        ("Due Date", view.meta.due_date.as_deref()),
    ]
}
