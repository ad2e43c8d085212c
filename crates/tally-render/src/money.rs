//! Number formatting for amounts, quantities and rates.

use serde::Serialize;
use tally_core::form::InvoiceView;

/// Symbol printed before an amount. Only glyphs the standard PDF fonts can
/// encode are used; anything else falls back to the ISO code.
pub fn currency_prefix(currency: &str) -> String {
    match currency {
        "" => String::new(),
        "USD" => "$".to_string(),
        "EUR" => "\u{20ac}".to_string(),
        "GBP" => "\u{a3}".to_string(),
        "JPY" | "CNY" => "\u{a5}".to_string(),
        "INR" => "Rs. ".to_string(),
        "CAD" => "CA$".to_string(),
        "AUD" => "A$".to_string(),
        other => format!("{other} "),
    }
}

/// `1234.5` → `1,234.50`.
pub fn format_amount(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    let frac = cents % 100;
    if negative && cents > 0 {
        format!("-{whole}.{frac:02}")
    } else {
        format!("{whole}.{frac:02}")
    }
}

pub fn format_money(value: f64, currency: &str) -> String {
    let amount = format_amount(value);
    let prefix = currency_prefix(currency);
    match amount.strip_prefix('-') {
        Some(positive) => format!("-{prefix}{positive}"),
        None => format!("{prefix}{amount}"),
    }
}

/// Whole quantities print without decimals; fractional ones keep up to two.
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    let fixed = format!("{value:.2}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

pub fn format_percent(value: f64) -> String {
    format!("{}%", format_quantity(value))
}

fn group_thousands(mut n: u64) -> String {
    let mut groups = Vec::new();
    loop {
        if n < 1000 {
            groups.push(n.to_string());
            break;
        }
        groups.push(format!("{:03}", n % 1000));
        n /= 1000;
    }
    groups.reverse();
    groups.join(",")
}

/// A formatted line of the totals block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub label: String,
    pub value: String,
    pub grand: bool,
}

/// Subtotal, tax and total rows for `view`, skipping any figure the record
/// does not provide or imply.
pub fn summary_rows(view: &InvoiceView) -> Vec<SummaryRow> {
    let currency = view.currency.as_str();
    let mut rows = Vec::new();
    if let Some(sub_total) = view.sub_total() {
        rows.push(SummaryRow {
            label: "Subtotal".to_string(),
            value: format_money(sub_total, currency),
            grand: false,
        });
    }
    if let Some(tax) = view.tax_amount() {
        let label = match view.totals.tax_percentage {
            Some(pct) => format!("Tax ({})", format_percent(pct)),
            None => "Tax".to_string(),
        };
        rows.push(SummaryRow {
            label,
            value: format_money(tax, currency),
            grand: false,
        });
    }
    if let Some(total) = view.grand_total() {
        rows.push(SummaryRow {
            label: "Total".to_string(),
            value: format_money(total, currency),
            grand: true,
        });
    }
    rows
}
