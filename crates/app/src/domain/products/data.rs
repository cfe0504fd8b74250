//! Products Data

use rust_decimal::Decimal;

use crate::domain::products::{
    errors::ProductsServiceError,
    records::{ProductUuid, VariantUuid},
};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub title: String,
    pub slug: String,
    pub price: u64,
    pub discount: Decimal,
    pub stock: u32,
    pub photos: Vec<String>,
}

/// Product Update Data
///
/// Replaces every editable field.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub title: String,
    pub slug: String,
    pub price: u64,
    pub discount: Decimal,
    pub stock: u32,
    pub photos: Vec<String>,
}

impl From<NewProduct> for ProductUpdate {
    fn from(product: NewProduct) -> Self {
        Self {
            title: product.title,
            slug: product.slug,
            price: product.price,
            discount: product.discount,
            stock: product.stock,
            photos: product.photos,
        }
    }
}

impl ProductUpdate {
    /// Trim text fields and check the discount range.
    ///
    /// # Errors
    ///
    /// - [`ProductsServiceError::MissingRequiredData`] for a blank title or slug.
    /// - [`ProductsServiceError::InvalidDiscount`] for a discount outside `0..=100`.
    pub fn validated(self) -> Result<Self, ProductsServiceError> {
        let title = self.title.trim().to_string();
        let slug = self.slug.trim().to_lowercase();

        if title.is_empty() || slug.is_empty() {
            return Err(ProductsServiceError::MissingRequiredData);
        }

        if self.discount.is_sign_negative() || self.discount > Decimal::ONE_HUNDRED {
            return Err(ProductsServiceError::InvalidDiscount);
        }

        Ok(Self {
            title,
            slug,
            ..self
        })
    }
}

/// New Variant Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVariant {
    pub uuid: VariantUuid,
    pub size: Option<String>,
    pub color: Option<String>,
    pub price: Option<u64>,
    pub stock: u32,
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use super::*;

    fn update(discount: Decimal) -> ProductUpdate {
        ProductUpdate {
            title: " Linen Shirt ".to_string(),
            slug: "Linen-Shirt".to_string(),
            price: 45_00,
            discount,
            stock: 3,
            photos: Vec::new(),
        }
    }

    #[test]
    fn validated_normalizes_title_and_slug() -> TestResult {
        let product = update(dec!(10)).validated()?;

        assert_eq!(product.title, "Linen Shirt");
        assert_eq!(product.slug, "linen-shirt");

        Ok(())
    }

    #[test]
    fn discount_above_hundred_is_rejected() {
        assert!(matches!(
            update(dec!(101)).validated(),
            Err(ProductsServiceError::InvalidDiscount)
        ));
    }

    #[test]
    fn blank_title_is_rejected() {
        let mut product = update(dec!(0));

        product.title = "   ".to_string();

        assert!(matches!(
            product.validated(),
            Err(ProductsServiceError::MissingRequiredData)
        ));
    }
}
