//! Invoice registry integration tests.

mod common;

use billfold::models::{CreateInvoice, InvoiceStatus, LineItem};
use billfold_core::error::BillingError;
use chrono::{Datelike, Utc};
use common::*;
use uuid::Uuid;

const EPSILON: f64 = 1e-9;

#[test]
fn create_invoice_derives_totals_and_forces_draft() {
    let mut store = empty_store();
    let customer = seed_acme(&mut store);

    let mut input = widget_invoice(customer.id);
    // A status supplied at creation must be ignored.
    input.status = InvoiceStatus::Paid;

    let invoice = store.create_invoice(input).expect("create");

    assert_eq!(invoice.id, format!("INV-{}-0001", Utc::now().year()));
    assert_eq!(invoice.customer_name, ACME_NAME);
    assert!((invoice.subtotal - 30.0).abs() < EPSILON);
    assert!((invoice.tax_amount - 3.0).abs() < EPSILON);
    assert!((invoice.total - 33.0).abs() < EPSILON);
    assert_eq!(invoice.status, InvoiceStatus::Draft);
    assert_eq!(invoice.created_utc, invoice.updated_utc);
    assert_eq!(store.invoices().len(), 1);
}

#[test]
fn customer_name_is_a_snapshot_not_a_reference() {
    let mut store = empty_store();
    let customer = seed_acme(&mut store);
    let invoice = store
        .create_invoice(widget_invoice(customer.id))
        .expect("create");

    let mut rename = customer_update(&customer);
    rename.name = "Acme Renamed".to_string();
    store.update_customer(rename).expect("rename");

    assert_eq!(
        store.invoice(&invoice.id).expect("lookup").customer_name,
        ACME_NAME
    );
}

#[test]
fn create_with_unknown_customer_mutates_nothing() {
    let mut store = empty_store();
    seed_acme(&mut store);

    let err = store
        .create_invoice(widget_invoice(Uuid::new_v4()))
        .unwrap_err();
    assert!(matches!(err, BillingError::CustomerNotFound(_)));
    assert!(store.invoices().is_empty());
    assert_eq!(store.settings().next_invoice_number, 1);
}

#[test]
fn aborted_creation_does_not_burn_a_number() {
    let mut store = empty_store();
    let customer = seed_acme(&mut store);

    store
        .create_invoice(widget_invoice(Uuid::new_v4()))
        .unwrap_err();
    let invoice = store
        .create_invoice(widget_invoice(customer.id))
        .expect("create");

    assert!(invoice.id.ends_with("-0001"));
}

#[test]
fn create_requires_at_least_one_item() {
    let mut store = empty_store();
    let customer = seed_acme(&mut store);

    let mut input = widget_invoice(customer.id);
    input.items.clear();

    let err = store.create_invoice(input).unwrap_err();
    assert!(matches!(err, BillingError::Validation(_)));
}

#[test]
fn create_rejects_non_positive_quantities() {
    let mut store = empty_store();
    let customer = seed_acme(&mut store);

    let mut input = widget_invoice(customer.id);
    input.items = vec![LineItem::new("Widget", 0.0, 10.0)];
    let err = store.create_invoice(input).unwrap_err();
    assert!(matches!(err, BillingError::Validation(_)));

    // Garbage form input coerces to a zero quantity and is then refused.
    let mut input = widget_invoice(customer.id);
    input.items = vec![LineItem::from_form("Widget", "three", "10")];
    let err = store.create_invoice(input).unwrap_err();
    assert!(matches!(err, BillingError::Validation(_)));

    assert!(store.invoices().is_empty());
}

#[test]
fn create_rejects_negative_unit_price() {
    let mut store = empty_store();
    let customer = seed_acme(&mut store);

    let mut input = widget_invoice(customer.id);
    input.items = vec![LineItem::new("Refund", 1.0, -5.0)];

    let err = store.create_invoice(input).unwrap_err();
    assert!(matches!(err, BillingError::Validation(_)));
}

#[test]
fn create_rejects_amounts_that_overflow_to_infinity() {
    let mut store = empty_store();
    let customer = seed_acme(&mut store);

    // An overflowing price coerces to infinity rather than failing to
    // parse; with a zero tax rate the derived total would become NaN.
    let mut input = widget_invoice(customer.id);
    input.items = vec![LineItem::from_form("Widget", "3", "1e999")];
    input.tax_rate = Some(0.0);
    let err = store.create_invoice(input).unwrap_err();
    assert!(matches!(err, BillingError::Validation(_)));

    let mut input = widget_invoice(customer.id);
    input.items = vec![LineItem::from_form("Widget", "1e999", "10")];
    let err = store.create_invoice(input).unwrap_err();
    assert!(matches!(err, BillingError::Validation(_)));

    // Two finite inputs can still overflow their product.
    let mut input = widget_invoice(customer.id);
    input.items = vec![LineItem::new("Bulk", 1e200, 1e200)];
    let err = store.create_invoice(input).unwrap_err();
    assert!(matches!(err, BillingError::Validation(_)));

    assert!(store.invoices().is_empty());
    assert_eq!(store.settings().next_invoice_number, 1);
}

#[test]
fn decoded_input_with_a_drifted_line_total_is_rejected() {
    let mut store = empty_store();
    let customer = seed_acme(&mut store);

    let payload = |total: f64| {
        format!(
            r#"{{
                "customer_id": "{}",
                "invoice_date": "2026-01-10",
                "due_date": "2026-02-10",
                "items": [{{
                    "id": "{}",
                    "description": "Widget",
                    "quantity": 3.0,
                    "unit_price": 10.0,
                    "total": {total}
                }}],
                "tax_rate": 0.1
            }}"#,
            customer.id,
            Uuid::new_v4()
        )
    };

    let honest: CreateInvoice = serde_json::from_str(&payload(30.0)).expect("decode");
    store.create_invoice(honest).expect("consistent total");

    let drifted: CreateInvoice = serde_json::from_str(&payload(999.0)).expect("decode");
    let err = store.create_invoice(drifted).unwrap_err();
    assert!(matches!(err, BillingError::Validation(_)));
    assert_eq!(store.invoices().len(), 1);
}

#[test]
fn due_date_may_equal_but_not_precede_invoice_date() {
    let mut store = empty_store();
    let customer = seed_acme(&mut store);

    let mut input = widget_invoice(customer.id);
    input.due_date = input.invoice_date;
    store.create_invoice(input).expect("same-day due date");

    let mut input = widget_invoice(customer.id);
    input.due_date = date(2026, 1, 9);
    let err = store.create_invoice(input).unwrap_err();
    assert!(matches!(err, BillingError::Validation(_)));
}

#[test]
fn create_rejects_tax_rate_outside_unit_interval() {
    let mut store = empty_store();
    let customer = seed_acme(&mut store);

    let mut input = widget_invoice(customer.id);
    input.tax_rate = Some(1.5);
    let err = store.create_invoice(input).unwrap_err();
    assert!(matches!(err, BillingError::Validation(_)));

    let mut input = widget_invoice(customer.id);
    input.tax_rate = Some(-0.1);
    let err = store.create_invoice(input).unwrap_err();
    assert!(matches!(err, BillingError::Validation(_)));
}

#[test]
fn invoice_ids_are_sequential_in_creation_order() {
    let mut store = empty_store();
    let customer = seed_acme(&mut store);

    let first = store
        .create_invoice(widget_invoice(customer.id))
        .expect("first");
    let second = store
        .create_invoice(widget_invoice(customer.id))
        .expect("second");

    assert!(first.id.ends_with("-0001"));
    assert!(second.id.ends_with("-0002"));
    assert_eq!(store.invoices()[0].id, first.id);
    assert_eq!(store.invoices()[1].id, second.id);
}

#[test]
fn update_recomputes_totals_and_preserves_creation_time() {
    let mut store = empty_store();
    let customer = seed_acme(&mut store);
    let invoice = store
        .create_invoice(widget_invoice(customer.id))
        .expect("create");

    let mut update = invoice_update(&invoice);
    update.items = vec![LineItem::new("Widget", 5.0, 10.0)];
    update.tax_rate = 0.2;
    update.status = InvoiceStatus::Sent;

    let updated = store.update_invoice(update).expect("update");

    assert!((updated.subtotal - 50.0).abs() < EPSILON);
    assert!((updated.tax_amount - 10.0).abs() < EPSILON);
    assert!((updated.total - 60.0).abs() < EPSILON);
    assert_eq!(updated.status, InvoiceStatus::Sent);
    assert_eq!(updated.created_utc, invoice.created_utc);
    assert!(updated.updated_utc >= invoice.updated_utc);
    assert_eq!(store.invoices().len(), 1);
}

#[test]
fn update_refreshes_the_customer_name_snapshot() {
    let mut store = empty_store();
    let customer = seed_acme(&mut store);
    let invoice = store
        .create_invoice(widget_invoice(customer.id))
        .expect("create");

    let mut rename = customer_update(&customer);
    rename.name = "Acme Renamed".to_string();
    store.update_customer(rename).expect("rename");

    let updated = store
        .update_invoice(invoice_update(&invoice))
        .expect("update");
    assert_eq!(updated.customer_name, "Acme Renamed");
}

#[test]
fn update_of_unknown_invoice_fails_loudly() {
    let mut store = empty_store();
    let customer = seed_acme(&mut store);
    let invoice = store
        .create_invoice(widget_invoice(customer.id))
        .expect("create");

    let mut update = invoice_update(&invoice);
    update.id = "INV-2026-9999".to_string();

    let err = store.update_invoice(update).unwrap_err();
    match err {
        BillingError::InvoiceNotFound(id) => assert_eq!(id, "INV-2026-9999"),
        other => panic!("expected InvoiceNotFound, got {other:?}"),
    }
}

#[test]
fn update_resolves_the_customer_before_the_invoice() {
    let mut store = empty_store();
    let customer = seed_acme(&mut store);
    let invoice = store
        .create_invoice(widget_invoice(customer.id))
        .expect("create");

    let mut update = invoice_update(&invoice);
    update.id = "INV-2026-9999".to_string();
    update.customer_id = Uuid::new_v4();

    let err = store.update_invoice(update).unwrap_err();
    assert!(matches!(err, BillingError::CustomerNotFound(_)));
}

#[test]
fn any_status_may_follow_any_other() {
    let mut store = empty_store();
    let customer = seed_acme(&mut store);
    let invoice = store
        .create_invoice(widget_invoice(customer.id))
        .expect("create");

    for status in [
        InvoiceStatus::Paid,
        InvoiceStatus::Draft,
        InvoiceStatus::Overdue,
        InvoiceStatus::Sent,
    ] {
        let current = store.invoice(&invoice.id).expect("lookup").clone();
        let mut update = invoice_update(&current);
        update.status = status;
        let updated = store.update_invoice(update).expect("update");
        assert_eq!(updated.status, status);
    }
}

#[test]
fn delete_invoice_is_unconditional() {
    let mut store = empty_store();
    let customer = seed_acme(&mut store);
    let invoice = store
        .create_invoice(widget_invoice(customer.id))
        .expect("create");

    assert!(!store.delete_invoice("INV-2026-9999"));
    assert_eq!(store.invoices().len(), 1);

    assert!(store.delete_invoice(&invoice.id));
    assert!(store.invoices().is_empty());
}

#[test]
fn deleted_invoice_numbers_are_never_reissued() {
    let mut store = empty_store();
    let customer = seed_acme(&mut store);

    let first = store
        .create_invoice(widget_invoice(customer.id))
        .expect("first");
    assert!(store.delete_invoice(&first.id));

    let second = store
        .create_invoice(widget_invoice(customer.id))
        .expect("second");
    assert!(second.id.ends_with("-0002"));
}
