//! Product Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use storefront::pricing::{PricingError, after_discount};

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub title: String,
    pub slug: String,
    pub price: u64,
    pub discount: Decimal,
    pub stock: u32,
    pub photos: Vec<String>,
    pub variants: Vec<VariantRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl ProductRecord {
    /// Listing price after the product's percentage discount.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidPercentage`] when the stored discount is out of range.
    pub fn after_discount(&self) -> Result<u64, PricingError> {
        after_discount(self.price, self.discount)
    }
}

/// Variant UUID
pub type VariantUuid = TypedUuid<VariantRecord>;

/// A size/color option of a product with its own stock and optional price.
#[derive(Debug, Clone)]
pub struct VariantRecord {
    pub uuid: VariantUuid,
    pub product_uuid: ProductUuid,
    pub size: Option<String>,
    pub color: Option<String>,
    pub price: Option<u64>,
    pub stock: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
