//! Payment Data

use serde_json::Value;

use crate::domain::payments::{errors::PaymentsServiceError, records::GatewayMode};

/// Gateway configuration, created or replaced by slug.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewaySettings {
    pub slug: String,
    pub name: String,
    pub enabled: bool,
    pub mode: GatewayMode,
    pub credentials: Value,
    pub require_proof: bool,
}

impl GatewaySettings {
    /// # Errors
    ///
    /// - [`PaymentsServiceError::MissingRequiredData`] for a blank slug or name.
    /// - [`PaymentsServiceError::InvalidData`] when credentials are not a JSON object.
    pub fn validated(self) -> Result<Self, PaymentsServiceError> {
        let slug = self.slug.trim().to_lowercase();
        let name = self.name.trim().to_string();

        if slug.is_empty() || name.is_empty() {
            return Err(PaymentsServiceError::MissingRequiredData);
        }

        if !self.credentials.is_object() {
            return Err(PaymentsServiceError::InvalidData);
        }

        Ok(Self { slug, name, ..self })
    }
}
