//! Prometheus metrics for the billfold engine.

use once_cell::sync::Lazy;
use prometheus::{register_counter, register_counter_vec, Counter, CounterVec, TextEncoder};

/// Counter of registry operations, by entity and operation.
pub static REGISTRY_OPERATIONS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "billfold_registry_operations_total",
        "Total number of registry operations",
        &["entity", "operation"]
    )
    .expect("Failed to register registry_operations_total")
});

/// Counter of invoices entering each status, incremented at creation and
/// on status-changing updates.
pub static INVOICES_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "billfold_invoices_total",
        "Total number of invoices entering each status",
        &["status"]
    )
    .expect("Failed to register invoices_total")
});

/// Running sum of invoiced amounts. Counter increments must be finite and
/// non-negative; invoice validation guarantees totals are both.
pub static INVOICE_AMOUNT_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "billfold_invoice_amount_total",
        "Total amount across created invoices"
    )
    .expect("Failed to register invoice_amount_total")
});

/// Counter of best-effort persistence failures, by document key.
pub static STORAGE_ERRORS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "billfold_storage_errors_total",
        "Total number of swallowed persistence failures",
        &["key"]
    )
    .expect("Failed to register storage_errors_total")
});

/// Initialize all metrics by forcing lazy registration.
pub fn init_metrics() {
    Lazy::force(&REGISTRY_OPERATIONS_TOTAL);
    Lazy::force(&INVOICES_TOTAL);
    Lazy::force(&INVOICE_AMOUNT_TOTAL);
    Lazy::force(&STORAGE_ERRORS_TOTAL);
    tracing::info!("Billing metrics initialized");
}

/// Render all registered metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder.encode_to_string(&metric_families).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_render_after_init() {
        init_metrics();
        REGISTRY_OPERATIONS_TOTAL
            .with_label_values(&["customer", "create"])
            .inc();

        let output = get_metrics();
        assert!(output.contains("billfold_registry_operations_total"));
    }
}
