use axum_helpers::validators::not_blank;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Product status
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ProductStatus {
    /// Product can be sold
    #[default]
    Available,
    /// Stock is zero or below
    OutOfStock,
    /// No longer sold; restocking does not revive it
    Discontinued,
}

/// Product category
///
/// Products created without a category are filed under `OTHER`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ProductCategory {
    Electronics,
    Clothing,
    Books,
    Home,
    Sports,
    Food,
    Other,
}

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Exact decimal price, serialized as a string (e.g. `"9.99"`)
    #[schema(value_type = String)]
    pub price: Decimal,
    pub stock_quantity: i32,
    pub category: ProductCategory,
    pub status: ProductStatus,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(
        custom(function = "not_blank", message = "Product name is required"),
        length(max = 200, message = "Product name cannot exceed 200 characters")
    )]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 1000, message = "Description cannot exceed 1000 characters"))]
    pub description: Option<String>,
    #[validate(custom(function = "positive_price"))]
    #[schema(value_type = String)]
    pub price: Decimal,
    #[validate(range(min = 0, message = "Stock quantity cannot be negative"))]
    #[serde(alias = "stockQuantity")]
    pub stock_quantity: i32,
    /// Defaults to `OTHER`
    #[serde(default)]
    pub category: Option<ProductCategory>,
    /// Defaults to `AVAILABLE`; ignored when stock is zero
    #[serde(default)]
    pub status: Option<ProductStatus>,
}

/// DTO for replacing a product's fields
///
/// Unlike [`CreateProduct`], the price is not required to be positive.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(
        custom(function = "not_blank", message = "Product name is required"),
        length(max = 200, message = "Product name cannot exceed 200 characters")
    )]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 1000, message = "Description cannot exceed 1000 characters"))]
    pub description: Option<String>,
    #[schema(value_type = String)]
    pub price: Decimal,
    #[validate(range(min = 0, message = "Stock quantity cannot be negative"))]
    #[serde(alias = "stockQuantity")]
    pub stock_quantity: i32,
    pub category: ProductCategory,
    /// Kept as-is when absent; ignored when stock is zero
    #[serde(default)]
    pub status: Option<ProductStatus>,
}

fn positive_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() || price.is_zero() {
        return Err(ValidationError::new("positive")
            .with_message(Cow::Borrowed("Price must be positive")));
    }
    Ok(())
}

/// Query string for `GET /products/search`
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameQuery {
    /// Case-insensitive substring of the product name
    pub name: String,
}

/// Query string for the price range endpoints (bounds inclusive)
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PriceRangeQuery {
    #[param(value_type = String)]
    #[serde(alias = "minPrice")]
    pub min_price: Decimal,
    #[param(value_type = String)]
    #[serde(alias = "maxPrice")]
    pub max_price: Decimal,
}

/// Query string for `PATCH /products/{id}/stock`
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StockQuery {
    #[serde(alias = "stockQuantity")]
    pub stock_quantity: i32,
}

/// Store-level predicate for list queries. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub category: Option<ProductCategory>,
    pub status: Option<ProductStatus>,
    /// Case-insensitive substring of the name
    pub name_contains: Option<String>,
    /// Inclusive lower price bound
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound
    pub max_price: Option<Decimal>,
    /// Exclusive upper stock bound
    pub stock_below: Option<i32>,
    /// Inclusive lower creation bound
    pub created_after: Option<DateTime<Utc>>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        self.category.is_none_or(|c| product.category == c)
            && self.status.is_none_or(|s| product.status == s)
            && self.name_contains.as_deref().is_none_or(|needle| {
                product
                    .name
                    .to_lowercase()
                    .contains(&needle.to_lowercase())
            })
            && self.min_price.is_none_or(|min| product.price >= min)
            && self.max_price.is_none_or(|max| product.price <= max)
            && self.stock_below.is_none_or(|limit| product.stock_quantity < limit)
            && self.created_after.is_none_or(|after| product.created_at >= after)
    }
}

impl Product {
    /// Build a product from create input, applying the default category and
    /// status and the stock-driven status rule.
    pub fn new(input: CreateProduct) -> Self {
        let now = Utc::now();
        let status = if input.stock_quantity <= 0 {
            ProductStatus::OutOfStock
        } else {
            input.status.unwrap_or_default()
        };

        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            price: input.price,
            stock_quantity: input.stock_quantity,
            category: input.category.unwrap_or(ProductCategory::Other),
            status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite all mutable fields.
    ///
    /// Status: zero or negative stock forces `OUT_OF_STOCK`, otherwise a
    /// supplied status wins, otherwise the current one is kept.
    pub fn apply_update(&mut self, update: UpdateProduct) {
        self.name = update.name;
        self.description = update.description;
        self.price = update.price;
        self.stock_quantity = update.stock_quantity;
        self.category = update.category;

        if update.stock_quantity <= 0 {
            self.status = ProductStatus::OutOfStock;
        } else if let Some(status) = update.status {
            self.status = status;
        }

        self.updated_at = Utc::now();
    }

    /// Set the stock level.
    ///
    /// Zero or below forces `OUT_OF_STOCK`. A positive quantity flips
    /// `OUT_OF_STOCK` back to `AVAILABLE`; `DISCONTINUED` is left alone.
    pub fn set_stock(&mut self, quantity: i32) {
        self.stock_quantity = quantity;

        if quantity <= 0 {
            self.status = ProductStatus::OutOfStock;
        } else if self.status == ProductStatus::OutOfStock {
            self.status = ProductStatus::Available;
        }

        self.updated_at = Utc::now();
    }
}
