//! Auth request and response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::{auth::Session, domain::customers::records::CustomerRecord};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerResponse {
    pub uuid: Uuid,
    pub email: String,
    pub name: String,
    /// `customer` or `admin`
    pub role: String,
    pub created_at: String,
}

impl From<CustomerRecord> for CustomerResponse {
    fn from(customer: CustomerRecord) -> Self {
        Self {
            uuid: customer.uuid.into(),
            email: customer.email,
            name: customer.name,
            role: customer.role.to_string(),
            created_at: customer.created_at.to_string(),
        }
    }
}

/// A newly issued bearer token. The token is shown once.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionResponse {
    pub token: String,
    pub customer: CustomerResponse,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            token: session.token,
            customer: session.customer.into(),
        }
    }
}
