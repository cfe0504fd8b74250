//! Order Data

use crate::domain::{
    customers::data::normalize_email,
    orders::{
        errors::OrdersServiceError,
        records::{OrderUuid, ShippingAddress},
    },
};

/// Checkout Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub payment_method: String,
    pub address: ShippingAddress,
}

impl NewOrder {
    /// Trim the address, lowercase the email and payment method.
    ///
    /// # Errors
    ///
    /// - [`OrdersServiceError::MissingRequiredData`] when a required field is blank.
    /// - [`OrdersServiceError::InvalidEmail`] for a malformed email.
    pub fn validated(self) -> Result<Self, OrdersServiceError> {
        let payment_method = self.payment_method.trim().to_lowercase();
        let address = self.address;

        let required = |value: String| {
            let value = value.trim().to_string();

            if value.is_empty() {
                Err(OrdersServiceError::MissingRequiredData)
            } else {
                Ok(value)
            }
        };

        let optional = |value: Option<String>| {
            value
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if payment_method.is_empty() {
            return Err(OrdersServiceError::MissingRequiredData);
        }

        let email = required(address.email)?;
        let email = normalize_email(&email).map_err(|_invalid| OrdersServiceError::InvalidEmail)?;

        Ok(Self {
            uuid: self.uuid,
            payment_method,
            address: ShippingAddress {
                first_name: required(address.first_name)?,
                last_name: required(address.last_name)?,
                email,
                phone: required(address.phone)?,
                country: required(address.country)?,
                post_code: optional(address.post_code),
                address1: required(address.address1)?,
                address2: optional(address.address2),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn checkout() -> NewOrder {
        NewOrder {
            uuid: OrderUuid::new(),
            payment_method: " COD ".to_string(),
            address: ShippingAddress {
                first_name: " Ada ".to_string(),
                last_name: "Lovelace".to_string(),
                email: "Ada@Example.com".to_string(),
                phone: "+44 20 7946 0000".to_string(),
                country: "GB".to_string(),
                post_code: Some("  ".to_string()),
                address1: "12 St James's Square".to_string(),
                address2: None,
            },
        }
    }

    #[test]
    fn checkout_fields_are_normalized() -> TestResult {
        let order = checkout().validated()?;

        assert_eq!(order.payment_method, "cod");
        assert_eq!(order.address.first_name, "Ada");
        assert_eq!(order.address.email, "ada@example.com");
        assert_eq!(order.address.post_code, None);

        Ok(())
    }

    #[test]
    fn blank_required_field_is_rejected() {
        let mut order = checkout();

        order.address.address1 = "   ".to_string();

        assert!(matches!(
            order.validated(),
            Err(OrdersServiceError::MissingRequiredData)
        ));
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut order = checkout();

        order.address.email = "not-an-email".to_string();

        assert!(matches!(
            order.validated(),
            Err(OrdersServiceError::InvalidEmail)
        ));
    }
}
