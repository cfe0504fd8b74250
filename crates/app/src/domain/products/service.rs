//! Products service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, NewVariant, ProductUpdate},
        errors::ProductsServiceError,
        records::{ProductRecord, ProductUuid, VariantRecord},
        repository::PgProductsRepository,
    },
    pagination::{Page, Paginated},
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }

    async fn with_variants(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut products: Vec<ProductRecord>,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let uuids: Vec<ProductUuid> = products.iter().map(|product| product.uuid).collect();

        let variants = self.repository.list_variants(tx, &uuids).await?;

        for product in &mut products {
            product.variants.extend(
                variants
                    .iter()
                    .filter(|variant| variant.product_uuid == product.uuid)
                    .cloned(),
            );
        }

        Ok(products)
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        page: Page,
    ) -> Result<Paginated<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx, page).await?;
        let total = self.repository.count_products(&mut tx).await?;
        let products = self.with_variants(&mut tx, products).await?;

        tx.commit().await?;

        Ok(Paginated {
            items: products,
            total: u64::try_from(total).unwrap_or_default(),
            page,
        })
    }

    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut product = self.repository.get_product(&mut tx, product).await?;

        product.variants = self.repository.list_variants(&mut tx, &[product.uuid]).await?;

        tx.commit().await?;

        Ok(product)
    }

    #[tracing::instrument(
        name = "products.service.create_product",
        skip(self, product),
        fields(product_uuid = %product.uuid),
        err
    )]
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let uuid = product.uuid;
        let details = ProductUpdate::from(product).validated()?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_product(&mut tx, uuid, &details)
            .await?;

        tx.commit().await?;

        info!("product created");

        Ok(created)
    }

    #[tracing::instrument(
        name = "products.service.update_product",
        skip(self, update),
        fields(product_uuid = %product),
        err
    )]
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let details = update.validated()?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, &details)
            .await?;

        let mut updated = self.with_variants(&mut tx, vec![updated]).await?;

        tx.commit().await?;

        updated.pop().ok_or(ProductsServiceError::NotFound)
    }

    #[tracing::instrument(
        name = "products.service.delete_product",
        skip(self),
        fields(product_uuid = %product),
        err
    )]
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        info!("product deleted");

        Ok(())
    }

    async fn create_variant(
        &self,
        product: ProductUuid,
        variant: NewVariant,
    ) -> Result<VariantRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_variant(&mut tx, product, &variant)
            .await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieve a page of live products with their variants.
    async fn list_products(
        &self,
        page: Page,
    ) -> Result<Paginated<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product with its variants.
    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Replaces a product's editable fields.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Soft deletes a product.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;

    /// Adds a variant to a live product.
    async fn create_variant(
        &self,
        product: ProductUuid,
        variant: NewVariant,
    ) -> Result<VariantRecord, ProductsServiceError>;
}
