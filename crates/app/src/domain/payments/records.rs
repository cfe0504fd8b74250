//! Payment Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Slug of the PayPal gateway. Every other gateway settles offline.
pub const PAYPAL: &str = "paypal";

/// Which set of gateway credentials is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayMode {
    Sandbox,
    Live,
    Test,
}

impl GatewayMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Live => "live",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for GatewayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown gateway mode: {0}")]
pub struct UnknownGatewayMode(pub String);

impl FromStr for GatewayMode {
    type Err = UnknownGatewayMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "sandbox" => Ok(Self::Sandbox),
            "live" => Ok(Self::Live),
            "test" => Ok(Self::Test),
            other => Err(UnknownGatewayMode(other.to_string())),
        }
    }
}

/// A configured payment gateway.
///
/// `credentials` holds one object per mode, e.g.
/// `{"sandbox": {"client_id": "…", "client_secret": "…"}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentGatewayRecord {
    pub slug: String,
    pub name: String,
    pub enabled: bool,
    pub mode: GatewayMode,
    pub credentials: Value,
    pub require_proof: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PaymentGatewayRecord {
    #[must_use]
    pub fn is_paypal(&self) -> bool {
        self.slug == PAYPAL
    }

    /// Credentials for the active mode.
    #[must_use]
    pub fn mode_credentials(&self) -> Option<&Value> {
        self.credentials.get(self.mode.as_str())
    }
}

/// PayPal REST app credentials.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct PaypalCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for PaypalCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaypalCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Result of a payment attempt, as the customer should see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentOutcome {
    pub success: bool,
    pub redirect_url: Option<String>,
    pub message: String,
}

impl PaymentOutcome {
    /// Payment settled (or accepted for offline settlement).
    #[must_use]
    pub fn completed(message: impl Into<String>) -> Self {
        Self {
            success: true,
            redirect_url: None,
            message: message.into(),
        }
    }

    /// The customer must continue at the gateway.
    #[must_use]
    pub fn redirect(url: impl Into<String>) -> Self {
        Self {
            success: true,
            redirect_url: Some(url.into()),
            message: "redirecting to payment gateway".to_string(),
        }
    }

    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            redirect_url: None,
            message: message.into(),
        }
    }
}
