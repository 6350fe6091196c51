use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductFilter};

/// Repository trait for Product persistence
///
/// The store only persists; status and default rules live on [`Product`]
/// and in the service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Store a new product
    async fn create(&self, product: Product) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// List products matching the filter, oldest first
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>>;

    /// All products priced at the catalog maximum, oldest first
    async fn most_expensive(&self) -> ProductResult<Vec<Product>>;

    /// Replace an existing product
    async fn update(&self, product: Product) -> ProductResult<Product>;

    /// Delete a product by ID, returning whether it existed
    async fn delete(&self, id: Uuid) -> ProductResult<bool>;

    /// Total number of stored products
    async fn count(&self) -> ProductResult<usize>;
}

/// In-memory implementation of ProductRepository
///
/// Clones share the same underlying map.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

fn sort_oldest_first(products: &mut [Product]) {
    products.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;
        products.insert(product.id, product.clone());

        tracing::debug!(product_id = %product.id, name = %product.name, "Stored product");
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;

        let mut result: Vec<Product> = products
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        sort_oldest_first(&mut result);

        Ok(result)
    }

    async fn most_expensive(&self) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;

        let Some(max_price) = products.values().map(|p| p.price).max() else {
            return Ok(Vec::new());
        };

        let mut result: Vec<Product> = products
            .values()
            .filter(|p| p.price == max_price)
            .cloned()
            .collect();
        sort_oldest_first(&mut result);

        Ok(result)
    }

    async fn update(&self, product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let Some(slot) = products.get_mut(&product.id) else {
            return Err(ProductError::NotFound(product.id));
        };
        *slot = product.clone();

        tracing::debug!(product_id = %product.id, "Replaced product");
        Ok(product)
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let mut products = self.products.write().await;
        Ok(products.remove(&id).is_some())
    }

    async fn count(&self) -> ProductResult<usize> {
        Ok(self.products.read().await.len())
    }
}
