//! Invoice export adapter seam.
//!
//! Rendering an invoice to a document is an external collaborator's job;
//! the engine defines the contract and fires renders without awaiting
//! them. An export failure is reported by the embedding application and
//! never reaches the registries.

use std::sync::Arc;

use async_trait::async_trait;
use billfold_core::error::BillingError;
use tokio::task::JoinHandle;
use tracing::error;

use crate::models::Invoice;

/// Renders an invoice to a named file, typically a PDF.
#[async_trait]
pub trait ExportAdapter: Send + Sync + 'static {
    async fn render_to_file(&self, invoice: &Invoice, filename: &str) -> Result<(), BillingError>;
}

/// Conventional export filename for an invoice: its id plus `.pdf`.
pub fn export_filename(invoice: &Invoice) -> String {
    format!("{}.pdf", invoice.id)
}

/// Fire-and-forget render on the async runtime, the engine's only async
/// boundary. Callers that care may await the returned handle; the engine
/// itself never does. Failures are logged and go no further.
pub fn spawn_render(
    adapter: Arc<dyn ExportAdapter>,
    invoice: Invoice,
    filename: String,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = adapter.render_to_file(&invoice, &filename).await {
            error!(
                invoice_id = %invoice.id,
                filename = %filename,
                error = %e,
                "Invoice export failed"
            );
        }
    })
}
