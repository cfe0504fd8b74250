//! Auth service errors.

use sqlx::Error;
use thiserror::Error;

use crate::{
    auth::{ApiTokenError, PasswordError},
    domain::customers::CustomersServiceError,
};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("token not found")]
    NotFound,

    #[error("email or password is incorrect")]
    InvalidCredentials,

    #[error("registration failed")]
    Registration(#[from] CustomersServiceError),

    #[error("password hashing failed")]
    Password(#[from] PasswordError),

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("token processing error")]
    Token(#[source] ApiTokenError),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}

impl From<ApiTokenError> for AuthServiceError {
    fn from(error: ApiTokenError) -> Self {
        Self::Token(error)
    }
}
