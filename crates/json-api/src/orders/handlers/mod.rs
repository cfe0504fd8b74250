//! Order Handlers

pub(crate) mod cancel;
pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod status;

#[cfg(test)]
pub(crate) mod tests {
    use jiff::Timestamp;
    use storefront::orders::{OrderStatus, PaymentStatus};

    use storefront_app::domain::{
        customers::records::CustomerUuid,
        orders::records::{OrderRecord, OrderUuid, ShippingAddress},
    };

    pub(crate) fn make_address() -> ShippingAddress {
        ShippingAddress {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+44 20 7946 0000".to_string(),
            country: "GB".to_string(),
            post_code: None,
            address1: "12 St James's Square".to_string(),
            address2: None,
        }
    }

    pub(crate) fn make_order(uuid: OrderUuid, customer_uuid: CustomerUuid) -> OrderRecord {
        OrderRecord {
            uuid,
            order_number: "ORD-4F7A9C2B1D".to_string(),
            customer_uuid,
            sub_total: 100_00,
            discount: 10_00,
            total_amount: 90_00,
            quantity: 5,
            coupon_code: Some("SAVE10".to_string()),
            status: OrderStatus::New,
            payment_method: "cod".to_string(),
            payment_status: PaymentStatus::Unpaid,
            payment_reference: None,
            payment_proof: None,
            address: make_address(),
            items: Vec::new(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
