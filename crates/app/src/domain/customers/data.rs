//! Customer Data

use crate::domain::customers::{
    errors::CustomersServiceError,
    records::{CustomerRole, CustomerUuid},
};

/// Shortest password accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// New Customer Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub uuid: CustomerUuid,
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: CustomerRole,
}

impl NewCustomer {
    /// Normalise and validate the registration fields.
    ///
    /// # Errors
    ///
    /// Returns [`CustomersServiceError::InvalidEmail`],
    /// [`CustomersServiceError::MissingRequiredData`] or
    /// [`CustomersServiceError::PasswordTooShort`].
    pub fn validated(self) -> Result<Self, CustomersServiceError> {
        let email = normalize_email(&self.email)?;
        let name = self.name.trim().to_string();

        if name.is_empty() {
            return Err(CustomersServiceError::MissingRequiredData);
        }

        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(CustomersServiceError::PasswordTooShort);
        }

        Ok(Self {
            email,
            name,
            ..self
        })
    }
}

/// Lowercase and sanity-check an email address.
///
/// # Errors
///
/// Returns [`CustomersServiceError::InvalidEmail`] unless the address has a
/// non-empty local part and a dotted domain.
pub fn normalize_email(email: &str) -> Result<String, CustomersServiceError> {
    let email = email.trim().to_lowercase();

    let valid = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
            && !domain.contains('@')
    }) && !email.chars().any(char::is_whitespace);

    if !valid {
        return Err(CustomersServiceError::InvalidEmail);
    }

    Ok(email)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn registration(email: &str, password: &str) -> NewCustomer {
        NewCustomer {
            uuid: CustomerUuid::new(),
            email: email.to_string(),
            name: " Ada ".to_string(),
            password: password.to_string(),
            role: CustomerRole::Customer,
        }
    }

    #[test]
    fn emails_are_lowercased_and_trimmed() -> TestResult {
        assert_eq!(normalize_email(" Ada@Example.COM ")?, "ada@example.com");

        Ok(())
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in ["", "ada", "ada@", "@example.com", "ada@example", "a b@example.com"] {
            assert!(
                matches!(normalize_email(email), Err(CustomersServiceError::InvalidEmail)),
                "{email} should be rejected"
            );
        }
    }

    #[test]
    fn short_passwords_are_rejected() {
        let result = registration("ada@example.com", "short").validated();

        assert!(matches!(
            result,
            Err(CustomersServiceError::PasswordTooShort)
        ));
    }

    #[test]
    fn validated_trims_name() -> TestResult {
        let customer = registration("ada@example.com", "correct horse").validated()?;

        assert_eq!(customer.name, "Ada");

        Ok(())
    }
}
