//! Registries and settings store.
//!
//! The store owns the in-memory customer and invoice collections plus the
//! numbering settings, and talks to a [`StorageGateway`] for best-effort
//! persistence. Operations are synchronous: each call runs to completion
//! against the held state, and a failed write never rolls a completed
//! mutation back.

use billfold_core::error::BillingError;
use chrono::{NaiveDate, Utc};
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{
    AppSettings, CreateCustomer, CreateInvoice, Customer, Invoice, InvoiceStatus, LineItem,
    UpdateCustomer, UpdateInvoice,
};
use crate::services::metrics::{INVOICES_TOTAL, INVOICE_AMOUNT_TOTAL, REGISTRY_OPERATIONS_TOTAL};
use crate::services::{numbering, totals};
use crate::storage::{self, StorageGateway, CUSTOMERS_KEY, INVOICES_KEY, SETTINGS_KEY};

/// In-memory registries with best-effort persistence.
pub struct BillingStore<G: StorageGateway> {
    gateway: G,
    customers: Vec<Customer>,
    invoices: Vec<Invoice>,
    settings: AppSettings,
}

impl<G: StorageGateway> BillingStore<G> {
    /// Load registries and settings from the gateway, falling back to
    /// empty collections and default settings for anything missing or
    /// unreadable.
    pub fn open(gateway: G) -> Self {
        let customers = storage::load_or_default(&gateway, CUSTOMERS_KEY, Vec::new());
        let invoices = storage::load_or_default(&gateway, INVOICES_KEY, Vec::new());
        let settings = storage::load_or_default(&gateway, SETTINGS_KEY, AppSettings::default());
        info!(
            customers = customers.len(),
            invoices = invoices.len(),
            next_invoice_number = settings.next_invoice_number,
            "Billing store opened"
        );
        BillingStore {
            gateway,
            customers,
            invoices,
            settings,
        }
    }

    // -------------------------------------------------------------------------
    // Customer operations
    // -------------------------------------------------------------------------

    /// Create a customer from validated input.
    #[instrument(skip(self, input))]
    pub fn create_customer(&mut self, input: CreateCustomer) -> Result<Customer, BillingError> {
        input.validate()?;

        let now = Utc::now();
        let customer = Customer {
            id: Uuid::new_v4(),
            name: input.name,
            phone: input.phone,
            whatsapp: input.whatsapp,
            email: input.email,
            address: input.address,
            created_utc: now,
            updated_utc: now,
        };
        self.customers.push(customer.clone());
        storage::persist(&self.gateway, CUSTOMERS_KEY, &self.customers);

        REGISTRY_OPERATIONS_TOTAL
            .with_label_values(&["customer", "create"])
            .inc();
        info!(customer_id = %customer.id, "Customer created");
        Ok(customer)
    }

    /// Update a customer in place, refreshing its update timestamp and
    /// preserving the creation timestamp.
    ///
    /// Returns `Ok(None)` without touching the registry when the id is
    /// unknown: a silent no-op, unlike invoice updates, which fail loudly
    /// on a missing id. The asymmetry is deliberate.
    #[instrument(skip(self, input), fields(customer_id = %input.id))]
    pub fn update_customer(
        &mut self,
        input: UpdateCustomer,
    ) -> Result<Option<Customer>, BillingError> {
        input.validate()?;

        let existing = match self.customers.iter_mut().find(|c| c.id == input.id) {
            Some(existing) => existing,
            None => {
                warn!(customer_id = %input.id, "Update for unknown customer ignored");
                return Ok(None);
            }
        };
        existing.name = input.name;
        existing.phone = input.phone;
        existing.whatsapp = input.whatsapp;
        existing.email = input.email;
        existing.address = input.address;
        existing.updated_utc = Utc::now();
        let updated = existing.clone();
        storage::persist(&self.gateway, CUSTOMERS_KEY, &self.customers);

        REGISTRY_OPERATIONS_TOTAL
            .with_label_values(&["customer", "update"])
            .inc();
        info!(customer_id = %updated.id, "Customer updated");
        Ok(Some(updated))
    }

    /// Delete a customer.
    ///
    /// Rejected while any invoice still references the customer; this is
    /// the one cross-entity invariant the store enforces. Deleting an
    /// unknown id is a no-op that touches neither storage nor metrics.
    #[instrument(skip(self))]
    pub fn delete_customer(&mut self, customer_id: Uuid) -> Result<(), BillingError> {
        let invoice_count = self
            .invoices
            .iter()
            .filter(|inv| inv.customer_id == customer_id)
            .count();
        if invoice_count > 0 {
            return Err(BillingError::CustomerInUse {
                customer_id,
                invoice_count,
            });
        }

        let before = self.customers.len();
        self.customers.retain(|c| c.id != customer_id);
        if self.customers.len() == before {
            return Ok(());
        }

        storage::persist(&self.gateway, CUSTOMERS_KEY, &self.customers);
        REGISTRY_OPERATIONS_TOTAL
            .with_label_values(&["customer", "delete"])
            .inc();
        info!(customer_id = %customer_id, "Customer deleted");
        Ok(())
    }

    /// Look up a customer by id. `None` is an expected outcome; callers
    /// use it to detect dangling references.
    pub fn customer(&self, customer_id: Uuid) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == customer_id)
    }

    /// Customers in entry order.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    // -------------------------------------------------------------------------
    // Invoice operations
    // -------------------------------------------------------------------------

    /// Create an invoice.
    ///
    /// A draft without an explicit tax rate picks up the settings'
    /// default. The customer is resolved after validation: an unknown id
    /// aborts the operation before anything is mutated, leaving both the
    /// registry and the numbering counter untouched. On success the
    /// customer name is snapshotted, totals are derived from the items,
    /// the formatted id is assigned, and the status is forced to draft
    /// regardless of what the caller supplied.
    #[instrument(skip(self, input), fields(customer_id = %input.customer_id))]
    pub fn create_invoice(&mut self, input: CreateInvoice) -> Result<Invoice, BillingError> {
        input.validate()?;
        let tax_rate = input.tax_rate.unwrap_or(self.settings.default_tax_rate);
        validate_invoice_rules(input.invoice_date, input.due_date, &input.items, tax_rate)?;

        let customer_name = match self.customer(input.customer_id) {
            Some(customer) => customer.name.clone(),
            None => return Err(BillingError::CustomerNotFound(input.customer_id)),
        };

        let amounts = totals::compute_totals(&input.items, tax_rate);
        let now = Utc::now();
        let invoice = Invoice {
            id: numbering::next_invoice_id(&self.settings),
            customer_id: input.customer_id,
            customer_name,
            invoice_date: input.invoice_date,
            due_date: input.due_date,
            items: input.items,
            subtotal: amounts.subtotal,
            tax_rate,
            tax_amount: amounts.tax_amount,
            total: amounts.total,
            notes: input.notes,
            status: InvoiceStatus::Draft,
            created_utc: now,
            updated_utc: now,
        };

        self.invoices.push(invoice.clone());
        // The counter advances only now that the invoice is in the
        // registry, so an aborted creation never burns a number.
        self.settings.next_invoice_number += 1;
        storage::persist(&self.gateway, INVOICES_KEY, &self.invoices);
        storage::persist(&self.gateway, SETTINGS_KEY, &self.settings);

        REGISTRY_OPERATIONS_TOTAL
            .with_label_values(&["invoice", "create"])
            .inc();
        INVOICES_TOTAL
            .with_label_values(&[invoice.status.as_str()])
            .inc();
        INVOICE_AMOUNT_TOTAL.inc_by(invoice.total);
        info!(invoice_id = %invoice.id, total = invoice.total, "Invoice created");
        Ok(invoice)
    }

    /// Update an invoice in place.
    ///
    /// Requires both a resolvable customer and an existing invoice id; an
    /// update cannot mint a new id. Totals and the customer name snapshot
    /// are recomputed from the input, the creation timestamp is preserved,
    /// and the status is honored as given.
    #[instrument(skip(self, input), fields(invoice_id = %input.id))]
    pub fn update_invoice(&mut self, input: UpdateInvoice) -> Result<Invoice, BillingError> {
        input.validate()?;
        validate_invoice_rules(input.invoice_date, input.due_date, &input.items, input.tax_rate)?;

        let customer_name = match self.customer(input.customer_id) {
            Some(customer) => customer.name.clone(),
            None => return Err(BillingError::CustomerNotFound(input.customer_id)),
        };
        let position = match self.invoices.iter().position(|inv| inv.id == input.id) {
            Some(position) => position,
            None => return Err(BillingError::InvoiceNotFound(input.id)),
        };

        let amounts = totals::compute_totals(&input.items, input.tax_rate);
        let previous_status = self.invoices[position].status;
        let invoice = Invoice {
            id: input.id,
            customer_id: input.customer_id,
            customer_name,
            invoice_date: input.invoice_date,
            due_date: input.due_date,
            items: input.items,
            subtotal: amounts.subtotal,
            tax_rate: input.tax_rate,
            tax_amount: amounts.tax_amount,
            total: amounts.total,
            notes: input.notes,
            status: input.status,
            created_utc: self.invoices[position].created_utc,
            updated_utc: Utc::now(),
        };
        self.invoices[position] = invoice.clone();
        storage::persist(&self.gateway, INVOICES_KEY, &self.invoices);

        REGISTRY_OPERATIONS_TOTAL
            .with_label_values(&["invoice", "update"])
            .inc();
        if invoice.status != previous_status {
            INVOICES_TOTAL
                .with_label_values(&[invoice.status.as_str()])
                .inc();
        }
        info!(
            invoice_id = %invoice.id,
            status = invoice.status.as_str(),
            "Invoice updated"
        );
        Ok(invoice)
    }

    /// Delete an invoice, returning whether anything was removed.
    ///
    /// Unconditional: deleting an unknown id is a no-op, and a deleted
    /// invoice's number is never reissued because the counter does not
    /// move backwards.
    #[instrument(skip(self))]
    pub fn delete_invoice(&mut self, invoice_id: &str) -> bool {
        let before = self.invoices.len();
        self.invoices.retain(|inv| inv.id != invoice_id);
        if self.invoices.len() == before {
            return false;
        }

        storage::persist(&self.gateway, INVOICES_KEY, &self.invoices);
        REGISTRY_OPERATIONS_TOTAL
            .with_label_values(&["invoice", "delete"])
            .inc();
        info!(invoice_id = invoice_id, "Invoice deleted");
        true
    }

    /// Look up an invoice by its formatted id.
    pub fn invoice(&self, invoice_id: &str) -> Option<&Invoice> {
        self.invoices.iter().find(|inv| inv.id == invoice_id)
    }

    /// Invoices in entry order.
    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    // -------------------------------------------------------------------------
    // Settings operations
    // -------------------------------------------------------------------------

    /// Current numbering and tax settings.
    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Replace the settings after validating them.
    ///
    /// Lowering the counter or changing the prefix can collide with ids
    /// already issued; that is an accepted operational hazard, not
    /// something this method detects.
    #[instrument(skip(self, settings))]
    pub fn update_settings(&mut self, settings: AppSettings) -> Result<AppSettings, BillingError> {
        settings.validate()?;

        self.settings = settings;
        storage::persist(&self.gateway, SETTINGS_KEY, &self.settings);

        REGISTRY_OPERATIONS_TOTAL
            .with_label_values(&["settings", "update"])
            .inc();
        info!(
            invoice_prefix = %self.settings.invoice_prefix,
            next_invoice_number = self.settings.next_invoice_number,
            "Settings updated"
        );
        Ok(self.settings.clone())
    }
}

/// Cross-field rules the derive attributes cannot express: date ordering
/// and the per-item and whole-invoice amount checks. Every amount must be
/// finite. Permissive form coercion lets overflowing input through as
/// infinity, and a zero tax rate then turns an infinite subtotal into
/// NaN. serde_json writes non-finite floats as null, which would poison
/// the persisted document on reload. Item totals are also checked against
/// their own inputs, since a decoded item could otherwise carry a total
/// that no longer matches quantity and unit price.
fn validate_invoice_rules(
    invoice_date: NaiveDate,
    due_date: NaiveDate,
    items: &[LineItem],
    tax_rate: f64,
) -> Result<(), BillingError> {
    let mut errors = ValidationErrors::new();

    if due_date < invoice_date {
        let mut error = ValidationError::new("due_date_before_invoice_date");
        error.message = Some("Due date cannot be before the invoice date".into());
        errors.add("due_date", error);
    }
    if items
        .iter()
        .any(|item| !item.quantity().is_finite() || item.quantity() <= 0.0)
    {
        let mut error = ValidationError::new("non_positive_quantity");
        error.message = Some("Quantity must be a finite number greater than zero".into());
        errors.add("items", error);
    }
    if items
        .iter()
        .any(|item| !item.unit_price().is_finite() || item.unit_price() < 0.0)
    {
        let mut error = ValidationError::new("negative_unit_price");
        error.message = Some("Unit price must be a finite number and cannot be negative".into());
        errors.add("items", error);
    }
    if items.iter().any(|item| {
        !item.total().is_finite() || item.total() != item.quantity() * item.unit_price()
    }) {
        let mut error = ValidationError::new("inconsistent_total");
        error.message = Some("Line total must be quantity times unit price".into());
        errors.add("items", error);
    }
    if !totals::compute_totals(items, tax_rate).total.is_finite() {
        let mut error = ValidationError::new("non_finite_total");
        error.message = Some("Invoice total overflows the representable range".into());
        errors.add("total", error);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(BillingError::Validation(errors))
    }
}
