//! Product request and response bodies.

use std::{str::FromStr, string::ToString};

use rust_decimal::Decimal;
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use storefront::pricing::PricingError;
use uuid::Uuid;

use storefront_app::domain::products::{
    data::ProductUpdate,
    records::{ProductRecord, VariantRecord},
};

use crate::extensions::*;

/// Product Request
///
/// Used for both create and update; every field is replaced.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductRequest {
    pub title: String,
    pub slug: String,
    /// Price in minor units
    pub price: u64,
    /// Percentage taken off the listed price, e.g. `"12.5"`
    #[serde(default)]
    pub discount: Option<String>,
    pub stock: u32,
    #[serde(default)]
    pub photos: Vec<String>,
}

impl TryFrom<ProductRequest> for ProductUpdate {
    type Error = StatusError;

    fn try_from(request: ProductRequest) -> Result<Self, Self::Error> {
        let discount = request
            .discount
            .as_deref()
            .map(|discount| Decimal::from_str(discount.trim()))
            .transpose()
            .or_400("discount must be a decimal percentage")?
            .unwrap_or(Decimal::ZERO);

        Ok(ProductUpdate {
            title: request.title,
            slug: request.slug,
            price: request.price,
            discount,
            stock: request.stock,
            photos: request.photos,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VariantResponse {
    pub uuid: Uuid,
    pub size: Option<String>,
    pub color: Option<String>,
    /// Overrides the product price when set
    pub price: Option<u64>,
    pub stock: u32,
}

impl From<VariantRecord> for VariantResponse {
    fn from(variant: VariantRecord) -> Self {
        Self {
            uuid: variant.uuid.into(),
            size: variant.size,
            color: variant.color,
            price: variant.price,
            stock: variant.stock,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    pub uuid: Uuid,
    pub title: String,
    pub slug: String,

    /// Listed price in minor units
    pub price: u64,

    /// Discount percentage, display only
    pub discount: String,

    /// Listed price with the discount applied
    pub after_discount: u64,

    pub stock: u32,
    pub photos: Vec<String>,
    pub variants: Vec<VariantResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<ProductRecord> for ProductResponse {
    type Error = PricingError;

    fn try_from(product: ProductRecord) -> Result<Self, Self::Error> {
        let after_discount = product.after_discount()?;

        Ok(Self {
            uuid: product.uuid.into(),
            title: product.title,
            slug: product.slug,
            price: product.price,
            discount: product.discount.normalize().to_string(),
            after_discount,
            stock: product.stock,
            photos: product.photos,
            variants: product.variants.into_iter().map(Into::into).collect(),
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        })
    }
}

/// Convert a record for rendering, logging pricing failures.
pub(crate) fn render_product(product: ProductRecord) -> Result<ProductResponse, StatusError> {
    ProductResponse::try_from(product).or_500("failed to price product")
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use storefront_app::domain::products::records::ProductUuid;

    use super::*;

    #[test]
    fn response_carries_discounted_price() -> TestResult {
        let product = ProductRecord {
            uuid: ProductUuid::new(),
            title: "Canvas Tote".to_string(),
            slug: "canvas-tote".to_string(),
            price: 20_00,
            discount: Decimal::new(250, 1),
            stock: 5,
            photos: Vec::new(),
            variants: Vec::new(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            deleted_at: None,
        };

        let response = ProductResponse::try_from(product)?;

        assert_eq!(response.after_discount, 15_00);
        assert_eq!(response.discount, "25");

        Ok(())
    }

    #[test]
    fn missing_discount_defaults_to_zero() -> TestResult {
        let update = ProductUpdate::try_from(ProductRequest {
            title: "Canvas Tote".to_string(),
            slug: "canvas-tote".to_string(),
            price: 20_00,
            discount: None,
            stock: 5,
            photos: Vec::new(),
        })?;

        assert_eq!(update.discount, Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn unparseable_discount_is_rejected() {
        let update = ProductUpdate::try_from(ProductRequest {
            title: "Canvas Tote".to_string(),
            slug: "canvas-tote".to_string(),
            price: 20_00,
            discount: Some("ten".to_string()),
            stock: 5,
            photos: Vec::new(),
        });

        assert!(update.is_err(), "expected a bad request");
    }
}
