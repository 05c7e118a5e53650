//! billfold entry point.

use billfold::services::init_metrics;
use billfold::startup::Application;
use billfold_core::config::BillingConfig;
use billfold_core::observability::init_tracing;

fn main() -> std::io::Result<()> {
    // Load configuration
    let config = BillingConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    // Initialize tracing
    init_tracing("billfold", &config.log_level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        data_dir = %config.data_dir.display(),
        "Starting billfold"
    );

    // Initialize metrics
    init_metrics();

    // Build the application and report what was loaded
    let app = Application::build(&config).map_err(|e| {
        tracing::error!(error = %e, "Failed to build application");
        std::io::Error::other(format!("Application build error: {}", e))
    })?;

    tracing::info!(
        customers = app.store().customers().len(),
        invoices = app.store().invoices().len(),
        next_invoice_number = app.store().settings().next_invoice_number,
        "billfold ready"
    );
    Ok(())
}
