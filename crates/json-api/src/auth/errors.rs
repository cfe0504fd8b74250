//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::{auth::AuthServiceError, domain::customers::CustomersServiceError};

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::NotFound => StatusError::unauthorized().brief("Invalid API token"),
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Email or password is incorrect")
        }
        AuthServiceError::Registration(source) => registration_error(source),
        AuthServiceError::Password(source) => {
            error!("failed to hash password: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Sql(source) => {
            error!("auth storage error: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Token(source) => {
            error!("failed to process api token: {source}");

            StatusError::internal_server_error()
        }
    }
}

fn registration_error(error: CustomersServiceError) -> StatusError {
    match error {
        CustomersServiceError::AlreadyExists => {
            StatusError::conflict().brief("Email is already registered")
        }
        CustomersServiceError::InvalidEmail => {
            StatusError::bad_request().brief("Email address is invalid")
        }
        CustomersServiceError::PasswordTooShort => {
            StatusError::bad_request().brief("Password must be at least 8 characters")
        }
        CustomersServiceError::MissingRequiredData
        | CustomersServiceError::InvalidData
        | CustomersServiceError::InvalidReference => {
            StatusError::bad_request().brief("Invalid registration payload")
        }
        CustomersServiceError::NotFound => StatusError::not_found().brief("Customer not found"),
        CustomersServiceError::Password(source) => {
            error!("failed to hash password: {source}");

            StatusError::internal_server_error()
        }
        CustomersServiceError::Sql(source) => {
            error!("failed to register customer: {source}");

            StatusError::internal_server_error()
        }
    }
}
