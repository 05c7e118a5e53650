//! Outbound adapter seams: export rendering and share links.

pub mod export;
pub mod share;

pub use export::{export_filename, spawn_render, ExportAdapter};
pub use share::{invoice_share_link, sanitize_phone, share_link, share_message};
