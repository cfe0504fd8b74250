//! Auth data models.

use uuid::Uuid;

use crate::domain::customers::records::{CustomerRecord, CustomerRole, CustomerUuid};

/// The customer behind a verified bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedCustomer {
    pub customer_uuid: CustomerUuid,
    pub token_uuid: Uuid,
    pub role: CustomerRole,
}

impl AuthenticatedCustomer {
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Token data used during bearer authentication.
#[derive(Debug, Clone)]
pub(crate) struct ActiveApiToken {
    pub customer_uuid: CustomerUuid,
    pub role: CustomerRole,
    pub token_hash: String,
}

/// Registration payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// A freshly issued token; the raw value is only ever returned here.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub customer: CustomerRecord,
}
