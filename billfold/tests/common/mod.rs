//! Shared test harness for billfold integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use billfold::models::{
    CreateCustomer, CreateInvoice, Customer, Invoice, InvoiceStatus, LineItem, UpdateCustomer,
    UpdateInvoice,
};
use billfold::services::store::BillingStore;
use billfold::storage::{MemoryStorage, StorageGateway};
use billfold_core::error::BillingError;
use chrono::NaiveDate;
use uuid::Uuid;

pub const ACME_NAME: &str = "Acme Corp";
pub const ACME_PHONE: &str = "555-1111";

/// Store over fresh in-memory storage.
pub fn empty_store() -> BillingStore<MemoryStorage> {
    BillingStore::open(MemoryStorage::new())
}

/// Store plus the shared storage handle, for reopen scenarios.
pub fn store_with_storage() -> (BillingStore<MemoryStorage>, MemoryStorage) {
    let storage = MemoryStorage::new();
    let store = BillingStore::open(storage.clone());
    (store, storage)
}

/// Create the standard test customer.
pub fn seed_acme<G: StorageGateway>(store: &mut BillingStore<G>) -> Customer {
    store
        .create_customer(acme_input())
        .expect("create test customer")
}

pub fn acme_input() -> CreateCustomer {
    CreateCustomer {
        name: ACME_NAME.to_string(),
        phone: ACME_PHONE.to_string(),
        whatsapp: None,
        email: None,
        address: None,
    }
}

/// Update input carrying a customer's current fields.
pub fn customer_update(customer: &Customer) -> UpdateCustomer {
    UpdateCustomer {
        id: customer.id,
        name: customer.name.clone(),
        phone: customer.phone.clone(),
        whatsapp: customer.whatsapp.clone(),
        email: customer.email.clone(),
        address: customer.address.clone(),
    }
}

/// Standard invoice input: one Widget line, quantity 3 at 10.0, 10% tax.
pub fn widget_invoice(customer_id: Uuid) -> CreateInvoice {
    CreateInvoice {
        customer_id,
        invoice_date: date(2026, 1, 10),
        due_date: date(2026, 2, 10),
        items: vec![LineItem::new("Widget", 3.0, 10.0)],
        tax_rate: Some(0.1),
        notes: None,
        status: InvoiceStatus::Draft,
    }
}

/// Update input mirroring an existing invoice, ready to be tweaked.
pub fn invoice_update(invoice: &Invoice) -> UpdateInvoice {
    UpdateInvoice {
        id: invoice.id.clone(),
        customer_id: invoice.customer_id,
        invoice_date: invoice.invoice_date,
        due_date: invoice.due_date,
        items: invoice.items.clone(),
        tax_rate: invoice.tax_rate,
        notes: invoice.notes.clone(),
        status: invoice.status,
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// In-memory gateway that counts its writes, for asserting whether an
/// operation persisted anything at all.
#[derive(Clone, Default)]
pub struct CountingStorage {
    inner: MemoryStorage,
    saves: Arc<AtomicUsize>,
}

impl CountingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl StorageGateway for CountingStorage {
    fn load(&self, key: &str) -> Result<Option<String>, BillingError> {
        self.inner.load(key)
    }

    fn save(&self, key: &str, payload: &str) -> Result<(), BillingError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(key, payload)
    }
}

/// Gateway whose writes always fail; reads find nothing. Exercises the
/// best-effort persistence contract.
pub struct FailingStorage;

impl StorageGateway for FailingStorage {
    fn load(&self, _key: &str) -> Result<Option<String>, BillingError> {
        Ok(None)
    }

    fn save(&self, _key: &str, _payload: &str) -> Result<(), BillingError> {
        Err(BillingError::Storage(anyhow::anyhow!("disk full")))
    }
}

/// Gateway whose reads always fail; exercises the fall-back-to-defaults
/// load path.
pub struct UnreadableStorage;

impl StorageGateway for UnreadableStorage {
    fn load(&self, key: &str) -> Result<Option<String>, BillingError> {
        Err(BillingError::Storage(anyhow::anyhow!(
            "cannot read {}",
            key
        )))
    }

    fn save(&self, _key: &str, _payload: &str) -> Result<(), BillingError> {
        Ok(())
    }
}
