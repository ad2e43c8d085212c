use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;

/// The invoice/receipt field set entered upstream.
///
/// Deliberately schemaless: the record is carried through the pipeline as
/// the JSON object it arrived as. Layouts read it through [`InvoiceView`],
/// which never fails on missing or oddly-typed fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData(Map<String, Value>);

impl FormData {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(CoreError::NotAnObject(json_kind(&other))),
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CoreError> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_value(value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Project the record onto the logical invoice fields.
    pub fn view(&self) -> InvoiceView {
        InvoiceView::from_fields(&self.0)
    }
}

impl From<Map<String, Value>> for FormData {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// A party block (seller, bill-to or ship-to).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Party {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Party {
    pub fn is_empty(&self) -> bool {
        self.lines().is_empty()
    }

    /// Non-empty lines in display order. Multi-line addresses are split.
    pub fn lines(&self) -> Vec<&str> {
        let mut lines = Vec::new();
        if let Some(name) = &self.name {
            lines.push(name.as_str());
        }
        if let Some(address) = &self.address {
            lines.extend(address.lines().map(str::trim).filter(|l| !l.is_empty()));
        }
        if let Some(phone) = &self.phone {
            lines.push(phone.as_str());
        }
        if let Some(email) = &self.email {
            lines.push(email.as_str());
        }
        lines
    }

    fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(fields) => Self {
                name: text_of(fields, &["name", "companyName", "company"]),
                address: address_of(fields),
                phone: text_of(fields, &["phone", "phoneNumber", "tel"]),
                email: text_of(fields, &["email"]),
            },
            other => Self {
                name: to_text(other),
                ..Self::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InvoiceMeta {
    pub number: Option<String>,
    pub date: Option<String>,
    pub due_date: Option<String>,
}

/// One row of the item table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LineItem {
    pub description: String,
    /// Secondary text shown under the description, if the record carries
    /// both an item name and a separate description.
    pub details: Option<String>,
    pub quantity: Option<f64>,
    pub unit_price: Option<f64>,
    pub total: Option<f64>,
}

impl LineItem {
    /// Stated line total, or quantity × unit price when both are known.
    pub fn amount(&self) -> Option<f64> {
        self.total
            .or_else(|| Some(self.quantity? * self.unit_price?))
    }

    fn from_value(value: &Value) -> Option<Self> {
        let fields = value.as_object()?;
        let name = text_of(fields, &["name", "item", "title"]);
        let description = text_of(fields, &["desc", "description"]);
        let quantity = number_of(fields, &["quantity", "qty"]);
        let unit_price = number_of(fields, &["amount", "price", "rate", "unitPrice"]);
        let total = number_of(fields, &["total", "lineTotal"]);

        if name.is_none()
            && description.is_none()
            && quantity.is_none()
            && unit_price.is_none()
            && total.is_none()
        {
            return None;
        }

        let (description, details) = match (name, description) {
            (Some(name), Some(desc)) if name != desc => (name, Some(desc)),
            (Some(name), _) => (name, None),
            (None, Some(desc)) => (desc, None),
            (None, None) => (String::new(), None),
        };

        Some(Self {
            description,
            details,
            quantity,
            unit_price,
            total,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Totals {
    pub sub_total: Option<f64>,
    pub tax_percentage: Option<f64>,
    pub tax_amount: Option<f64>,
    pub grand_total: Option<f64>,
}

/// Read-only invoice projection of a [`FormData`] record.
///
/// Field names follow the shapes produced by the form page, with a few
/// common aliases. Anything missing stays `None`; nothing is invented.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InvoiceView {
    pub seller: Party,
    pub bill_to: Party,
    pub ship_to: Party,
    pub meta: InvoiceMeta,
    pub items: Vec<LineItem>,
    pub totals: Totals,
    pub notes: Option<String>,
    /// ISO currency code, empty when the record does not name one.
    pub currency: String,
}

impl InvoiceView {
    fn from_fields(fields: &Map<String, Value>) -> Self {
        let party = |keys: &[&str]| {
            first_of(fields, keys)
                .map(Party::from_value)
                .unwrap_or_default()
        };

        let invoice = fields.get("invoice").and_then(Value::as_object);
        let meta_text = |nested: &[&str], flat: &[&str]| {
            invoice
                .and_then(|inv| text_of(inv, nested))
                .or_else(|| text_of(fields, flat))
        };

        let items = fields
            .get("items")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(LineItem::from_value).collect())
            .unwrap_or_default();

        Self {
            seller: party(&["yourCompany", "from", "company", "seller"]),
            bill_to: party(&["billTo", "customer", "to"]),
            ship_to: party(&["shipTo"]),
            meta: InvoiceMeta {
                number: meta_text(&["number", "invoiceNumber"], &["invoiceNumber", "number", "receiptNumber"]),
                date: meta_text(&["date"], &["date", "invoiceDate"]),
                due_date: meta_text(&["paymentDate", "dueDate"], &["paymentDate", "dueDate"]),
            },
            items,
            totals: Totals {
                sub_total: number_of(fields, &["subTotal", "subtotal"]),
                tax_percentage: number_of(fields, &["taxPercentage", "taxRate"]),
                tax_amount: number_of(fields, &["taxAmount", "tax"]),
                grand_total: number_of(fields, &["grandTotal", "total"]),
            },
            notes: text_of(fields, &["notes", "note", "footer"]),
            currency: text_of(fields, &["selectedCurrency", "currency"])
                .map(|c| c.to_ascii_uppercase())
                .unwrap_or_default(),
        }
    }

    /// Stated subtotal, else the sum of known line amounts.
    pub fn sub_total(&self) -> Option<f64> {
        self.totals.sub_total.or_else(|| {
            let amounts: Vec<f64> = self.items.iter().filter_map(LineItem::amount).collect();
            (!amounts.is_empty()).then(|| amounts.iter().sum())
        })
    }

    /// Stated tax amount, else subtotal × tax percentage.
    pub fn tax_amount(&self) -> Option<f64> {
        self.totals
            .tax_amount
            .or_else(|| Some(self.sub_total()? * self.totals.tax_percentage? / 100.0))
    }

    /// Stated grand total, else subtotal plus tax.
    pub fn grand_total(&self) -> Option<f64> {
        self.totals.grand_total.or_else(|| {
            let sub_total = self.sub_total()?;
            Some(sub_total + self.tax_amount().unwrap_or(0.0))
        })
    }
}

fn first_of<'a>(fields: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .find(|value| !value.is_null())
}

fn text_of(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .find_map(to_text)
}

fn number_of(fields: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .find_map(to_number)
}

fn address_of(fields: &Map<String, Value>) -> Option<String> {
    match first_of(fields, &["address", "addr"])? {
        Value::Array(parts) => {
            let lines: Vec<String> = parts.iter().filter_map(to_text).collect();
            (!lines.is_empty()).then(|| lines.join("\n"))
        }
        Value::Object(parts) => {
            let lines: Vec<String> = parts.values().filter_map(to_text).collect();
            (!lines.is_empty()).then(|| lines.join("\n"))
        }
        other => to_text(other),
    }
}

fn to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
            cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
        }
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
