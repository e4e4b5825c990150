//! Buyer information attached to a sold ticket

use serde::{Deserialize, Serialize};

/// Buyer details recorded at sale time
///
/// `nombre` and `telefono` are required for a manual sale; PayPal sales
/// carry the order/payer ids from the capture result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyerInfo {
    pub nombre: String,
    pub telefono: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paypal_order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paypal_payer_id: Option<String>,
}

impl BuyerInfo {
    pub fn new(nombre: impl Into<String>, telefono: impl Into<String>) -> Self {
        Self {
            nombre: nombre.into(),
            telefono: telefono.into(),
            email: None,
            paypal_order_id: None,
            paypal_payer_id: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        let email = email.into();
        if !email.is_empty() {
            self.email = Some(email);
        }
        self
    }

    /// Email as stored in the sheet row (empty string when absent)
    pub fn email_or_empty(&self) -> &str {
        self.email.as_deref().unwrap_or("")
    }
}
