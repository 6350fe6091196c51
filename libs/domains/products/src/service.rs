use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProduct, Product, ProductCategory, ProductFilter, ProductStatus, UpdateProduct,
};
use crate::repository::ProductRepository;

/// Products below this stock level (and still `AVAILABLE`) count as low stock
pub const LOW_STOCK_THRESHOLD: i32 = 10;

/// Window for [`ProductService::list_recent`]
pub const RECENT_WINDOW_DAYS: i64 = 7;

/// Service layer for Product business logic
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product
    ///
    /// Missing category becomes `OTHER`, missing status `AVAILABLE`; zero or
    /// negative stock always yields `OUT_OF_STOCK`.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = Product::new(input);
        let created = self.repository.create(product).await?;

        tracing::info!(
            product_id = %created.id,
            category = %created.category,
            status = %created.status,
            "Created product"
        );
        Ok(created)
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list(ProductFilter::default()).await
    }

    #[instrument(skip(self))]
    pub async fn list_by_category(&self, category: ProductCategory) -> ProductResult<Vec<Product>> {
        self.repository
            .list(ProductFilter {
                category: Some(category),
                ..Default::default()
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_by_status(&self, status: ProductStatus) -> ProductResult<Vec<Product>> {
        self.repository
            .list(ProductFilter {
                status: Some(status),
                ..Default::default()
            })
            .await
    }

    pub async fn list_available(&self) -> ProductResult<Vec<Product>> {
        self.list_by_status(ProductStatus::Available).await
    }

    #[instrument(skip(self))]
    pub async fn list_available_by_category(
        &self,
        category: ProductCategory,
    ) -> ProductResult<Vec<Product>> {
        self.repository
            .list(ProductFilter {
                category: Some(category),
                status: Some(ProductStatus::Available),
                ..Default::default()
            })
            .await
    }

    /// Case-insensitive substring match on the name
    #[instrument(skip(self))]
    pub async fn search_by_name(&self, name: &str) -> ProductResult<Vec<Product>> {
        self.repository
            .list(ProductFilter {
                name_contains: Some(name.to_string()),
                ..Default::default()
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_by_max_price(&self, max_price: Decimal) -> ProductResult<Vec<Product>> {
        self.repository
            .list(ProductFilter {
                max_price: Some(max_price),
                ..Default::default()
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_by_min_price(&self, min_price: Decimal) -> ProductResult<Vec<Product>> {
        self.repository
            .list(ProductFilter {
                min_price: Some(min_price),
                ..Default::default()
            })
            .await
    }

    /// Inclusive on both ends. An inverted range is empty, not an error.
    #[instrument(skip(self))]
    pub async fn list_by_price_range(
        &self,
        min_price: Decimal,
        max_price: Decimal,
    ) -> ProductResult<Vec<Product>> {
        self.repository
            .list(ProductFilter {
                min_price: Some(min_price),
                max_price: Some(max_price),
                ..Default::default()
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_by_price_range_and_category(
        &self,
        min_price: Decimal,
        max_price: Decimal,
        category: ProductCategory,
    ) -> ProductResult<Vec<Product>> {
        self.repository
            .list(ProductFilter {
                category: Some(category),
                min_price: Some(min_price),
                max_price: Some(max_price),
                ..Default::default()
            })
            .await
    }

    /// `AVAILABLE` products with fewer than [`LOW_STOCK_THRESHOLD`] units
    #[instrument(skip(self))]
    pub async fn list_low_stock(&self) -> ProductResult<Vec<Product>> {
        self.repository
            .list(ProductFilter {
                status: Some(ProductStatus::Available),
                stock_below: Some(LOW_STOCK_THRESHOLD),
                ..Default::default()
            })
            .await
    }

    /// Every product tied at the catalog's highest price
    #[instrument(skip(self))]
    pub async fn list_most_expensive(&self) -> ProductResult<Vec<Product>> {
        self.repository.most_expensive().await
    }

    /// Products created within the last [`RECENT_WINDOW_DAYS`] days
    #[instrument(skip(self))]
    pub async fn list_recent(&self) -> ProductResult<Vec<Product>> {
        let since = Utc::now() - Duration::days(RECENT_WINDOW_DAYS);
        self.repository
            .list(ProductFilter {
                created_after: Some(since),
                ..Default::default()
            })
            .await
    }

    /// Replace a product's mutable fields
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        let mut product = self.get_product(id).await?;
        product.apply_update(input);

        let updated = self.repository.update(product).await?;
        tracing::info!(product_id = %updated.id, status = %updated.status, "Updated product");
        Ok(updated)
    }

    /// Set the stock level, moving between `AVAILABLE` and `OUT_OF_STOCK`
    #[instrument(skip(self))]
    pub async fn update_stock(&self, id: Uuid, stock_quantity: i32) -> ProductResult<Product> {
        let mut product = self.get_product(id).await?;
        let previous = product.status;
        product.set_stock(stock_quantity);

        let updated = self.repository.update(product).await?;
        tracing::info!(
            product_id = %updated.id,
            stock_quantity,
            from = %previous,
            to = %updated.status,
            "Updated stock"
        );
        Ok(updated)
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        if !self.repository.delete(id).await? {
            return Err(ProductError::NotFound(id));
        }

        tracing::info!(product_id = %id, "Deleted product");
        Ok(())
    }

    pub async fn count(&self) -> ProductResult<usize> {
        self.repository.count().await
    }
}
