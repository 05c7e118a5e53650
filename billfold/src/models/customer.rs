//! Customer data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A customer record held by the customer registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    /// Preferred WhatsApp contact; the share adapter falls back to `phone`
    /// when this is absent.
    pub whatsapp: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

impl Customer {
    /// Contact number used for outbound share links.
    pub fn share_contact(&self) -> &str {
        self.whatsapp.as_deref().unwrap_or(&self.phone)
    }
}

/// Input for creating a new customer.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCustomer {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    pub whatsapp: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Input for updating an existing customer. Carries every editable field;
/// the registry preserves the original creation timestamp.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCustomer {
    pub id: Uuid,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    pub whatsapp: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub address: Option<String>,
}
