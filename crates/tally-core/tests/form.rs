use serde_json::json;
use tally_core::form::FormData;

fn form(value: serde_json::Value) -> FormData {
    FormData::from_value(value).unwrap()
}

#[test]
fn minimal_record_projects_items_and_total() {
    let data = form(json!({
        "items": [{ "desc": "Widget", "qty": 2, "price": 5 }],
        "total": 10
    }));
    let view = data.view();

    assert_eq!(view.items.len(), 1);
    let item = &view.items[0];
    assert_eq!(item.description, "Widget");
    assert_eq!(item.quantity, Some(2.0));
    assert_eq!(item.unit_price, Some(5.0));
    assert_eq!(item.amount(), Some(10.0));
    assert_eq!(view.grand_total(), Some(10.0));
    assert!(view.seller.is_empty());
    assert!(view.notes.is_none());
}

#[test]
fn form_page_shape_is_read() {
    let data = form(json!({
        "billTo": { "name": "Acme Ltd", "address": "1 Road\nTown", "phone": "555" },
        "shipTo": { "name": "", "address": "" },
        "invoice": { "number": "INV-7", "date": "2024-05-01", "paymentDate": "2024-05-31" },
        "yourCompany": { "name": "Tally Co", "address": "2 Street" },
        "items": [
            { "name": "Design", "description": "Logo work", "quantity": "3", "amount": "150.50", "total": "451.50" }
        ],
        "taxPercentage": 10,
        "subTotal": 451.5,
        "notes": "Net 30",
        "selectedCurrency": "usd"
    }));
    let view = data.view();

    assert_eq!(view.bill_to.lines(), vec!["Acme Ltd", "1 Road", "Town", "555"]);
    assert!(view.ship_to.is_empty());
    assert_eq!(view.meta.number.as_deref(), Some("INV-7"));
    assert_eq!(view.meta.due_date.as_deref(), Some("2024-05-31"));
    assert_eq!(view.items[0].description, "Design");
    assert_eq!(view.items[0].details.as_deref(), Some("Logo work"));
    assert_eq!(view.items[0].amount(), Some(451.5));
    assert_eq!(view.tax_amount(), Some(45.15));
    assert_eq!(view.currency, "USD");
}

#[test]
fn malformed_fields_degrade_to_absent() {
    let data = form(json!({
        "items": [42, null, {}, { "name": "Kept" }],
        "billTo": ["not", "an", "object"],
        "subTotal": "n/a",
        "invoice": "oops"
    }));
    let view = data.view();

    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].description, "Kept");
    assert_eq!(view.items[0].amount(), None);
    assert!(view.bill_to.is_empty());
    assert_eq!(view.sub_total(), None);
    assert_eq!(view.grand_total(), None);
    assert!(view.meta.number.is_none());
}

#[test]
fn items_with_only_a_line_total_are_kept() {
    let data = form(json!({ "items": [{ "total": 50 }, {}], "total": 50 }));
    let view = data.view();

    assert_eq!(view.items.len(), 1);
    let item = &view.items[0];
    assert_eq!(item.description, "");
    assert_eq!(item.quantity, None);
    assert_eq!(item.amount(), Some(50.0));
    assert_eq!(view.sub_total(), Some(50.0));
}

#[test]
fn non_object_record_is_rejected() {
    assert!(FormData::from_value(json!([1, 2])).is_err());
    assert!(FormData::from_json_str("\"text\"").is_err());
    assert!(FormData::from_json_str("{\"a\": 1}").is_ok());
}
