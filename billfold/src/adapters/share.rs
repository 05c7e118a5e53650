//! WhatsApp share-link construction.
//!
//! Pure string work: the engine produces a deep link with a prefilled
//! message and leaves opening it to the embedding application.

use crate::models::{Customer, Invoice};

/// Strip a phone number down to its digits, keeping at most one leading
/// `+`. Spaces, dashes, parentheses, and stray text all drop out.
pub fn sanitize_phone(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut sanitized = String::with_capacity(trimmed.len());
    for (index, ch) in trimmed.char_indices() {
        if ch.is_ascii_digit() || (ch == '+' && index == 0) {
            sanitized.push(ch);
        }
    }
    sanitized
}

/// Default share message for an invoice.
pub fn share_message(invoice: &Invoice) -> String {
    format!(
        "Hi {}, your invoice {} for {:.2} is ready. Payment is due by {}. Thank you!",
        invoice.customer_name, invoice.id, invoice.total, invoice.due_date
    )
}

/// Build a `wa.me` deep link for `phone` with `message` prefilled. The
/// sanitized number is embedded without its leading `+`, per the `wa.me`
/// URL convention.
pub fn share_link(phone: &str, message: &str) -> String {
    let number = sanitize_phone(phone);
    let number = number.strip_prefix('+').unwrap_or(&number);
    let query = serde_urlencoded::to_string([("text", message)]).unwrap_or_default();
    format!("https://wa.me/{}?{}", number, query)
}

/// Share link for an invoice, addressed to its customer's preferred
/// contact (WhatsApp number when present, otherwise the phone number).
pub fn invoice_share_link(customer: &Customer, invoice: &Invoice) -> String {
    share_link(customer.share_contact(), &share_message(invoice))
}
