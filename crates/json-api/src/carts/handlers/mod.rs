//! Cart Handlers

pub(crate) mod add_item;
pub(crate) mod apply_coupon;
pub(crate) mod get;
pub(crate) mod remove_coupon;
pub(crate) mod remove_item;
pub(crate) mod update_item;

#[cfg(test)]
pub(crate) mod tests {
    use jiff::Timestamp;

    use storefront_app::domain::{
        carts::records::{CartItemRecord, CartItemUuid},
        products::records::ProductUuid,
    };

    pub(crate) fn make_item(uuid: CartItemUuid, quantity: u32, price: u64) -> CartItemRecord {
        CartItemRecord {
            uuid,
            product_uuid: ProductUuid::new(),
            variant_uuid: None,
            title: "Canvas Tote".to_string(),
            size: None,
            color: None,
            quantity,
            price,
            amount: price * u64::from(quantity),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
