//! HTTP handlers for Products API

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use axum_helpers::{
    AppError, QueryParams, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestParameterResponse, BadRequestUuidResponse, BadRequestValidationResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
    parse_param,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{
    CreateProduct, NameQuery, PriceRangeQuery, Product, ProductCategory, ProductStatus,
    StockQuery, UpdateProduct,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

type SharedService<R> = State<Arc<ProductService<R>>>;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        update_stock,
        get_by_category,
        get_by_status,
        list_available,
        list_available_by_category,
        search_by_name,
        get_by_max_price,
        get_by_min_price,
        get_by_price_range,
        get_by_price_range_and_category,
        list_low_stock,
        list_most_expensive,
        list_recent,
    ),
    components(
        schemas(Product, CreateProduct, UpdateProduct, ProductStatus, ProductCategory),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            BadRequestParameterResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/available", get(list_available))
        .route("/available/category/{category}", get(list_available_by_category))
        .route("/category/{category}", get(get_by_category))
        .route("/status/{status}", get(get_by_status))
        .route("/search", get(search_by_name))
        .route("/price/max/{max_price}", get(get_by_max_price))
        .route("/price/min/{min_price}", get(get_by_min_price))
        .route("/price/range", get(get_by_price_range))
        .route(
            "/price/range/category/{category}",
            get(get_by_price_range_and_category),
        )
        .route("/low-stock", get(list_low_stock))
        .route("/most-expensive", get(list_most_expensive))
        .route("/recent", get(list_recent))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/{id}/stock", patch(update_stock))
        .with_state(shared_service)
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "All products, oldest first", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): SharedService<R>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_products().await?;
    Ok(Json(products))
}

/// Create a new product
///
/// Zero stock always produces `OUT_OF_STOCK`, whatever status is sent.
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): SharedService<R>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): SharedService<R>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Replace a product's fields
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): SharedService<R>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<Product>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): SharedService<R>,
    UuidPath(id): UuidPath,
) -> ProductResult<impl IntoResponse> {
    service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Set a product's stock level
#[utoipa::path(
    patch,
    path = "/{id}/stock",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID"),
        StockQuery
    ),
    responses(
        (status = 200, description = "Stock updated", body = Product),
        (status = 400, response = BadRequestParameterResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_stock<R: ProductRepository>(
    State(service): SharedService<R>,
    UuidPath(id): UuidPath,
    QueryParams(query): QueryParams<StockQuery>,
) -> ProductResult<Json<Product>> {
    let product = service.update_stock(id, query.stock_quantity).await?;
    Ok(Json(product))
}

/// List products in a category
#[utoipa::path(
    get,
    path = "/category/{category}",
    tag = "Products",
    params(
        ("category" = ProductCategory, Path, description = "Product category")
    ),
    responses(
        (status = 200, description = "Products in the category", body = Vec<Product>),
        (status = 400, response = BadRequestParameterResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_by_category<R: ProductRepository>(
    State(service): SharedService<R>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Product>>, AppError> {
    let category: ProductCategory = parse_param("category", &category)?;
    let products = service.list_by_category(category).await?;
    Ok(Json(products))
}

/// List products with a given status
#[utoipa::path(
    get,
    path = "/status/{status}",
    tag = "Products",
    params(
        ("status" = ProductStatus, Path, description = "Product status")
    ),
    responses(
        (status = 200, description = "Products with the status", body = Vec<Product>),
        (status = 400, response = BadRequestParameterResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_by_status<R: ProductRepository>(
    State(service): SharedService<R>,
    Path(status): Path<String>,
) -> Result<Json<Vec<Product>>, AppError> {
    let status: ProductStatus = parse_param("status", &status)?;
    let products = service.list_by_status(status).await?;
    Ok(Json(products))
}

/// List available products
#[utoipa::path(
    get,
    path = "/available",
    tag = "Products",
    responses(
        (status = 200, description = "Products with status AVAILABLE", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_available<R: ProductRepository>(
    State(service): SharedService<R>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_available().await?;
    Ok(Json(products))
}

/// List available products in a category
#[utoipa::path(
    get,
    path = "/available/category/{category}",
    tag = "Products",
    params(
        ("category" = ProductCategory, Path, description = "Product category")
    ),
    responses(
        (status = 200, description = "Available products in the category", body = Vec<Product>),
        (status = 400, response = BadRequestParameterResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_available_by_category<R: ProductRepository>(
    State(service): SharedService<R>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Product>>, AppError> {
    let category: ProductCategory = parse_param("category", &category)?;
    let products = service.list_available_by_category(category).await?;
    Ok(Json(products))
}

/// Search products by name
#[utoipa::path(
    get,
    path = "/search",
    tag = "Products",
    params(NameQuery),
    responses(
        (status = 200, description = "Products whose name contains the term", body = Vec<Product>),
        (status = 400, response = BadRequestParameterResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_by_name<R: ProductRepository>(
    State(service): SharedService<R>,
    QueryParams(query): QueryParams<NameQuery>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.search_by_name(&query.name).await?;
    Ok(Json(products))
}

/// List products priced at or below a limit
#[utoipa::path(
    get,
    path = "/price/max/{max_price}",
    tag = "Products",
    params(
        ("max_price" = String, Path, description = "Inclusive upper bound, e.g. `50.00`")
    ),
    responses(
        (status = 200, description = "Products at or below the price", body = Vec<Product>),
        (status = 400, response = BadRequestParameterResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_by_max_price<R: ProductRepository>(
    State(service): SharedService<R>,
    Path(max_price): Path<String>,
) -> Result<Json<Vec<Product>>, AppError> {
    let max_price: Decimal = parse_param("max_price", &max_price)?;
    let products = service.list_by_max_price(max_price).await?;
    Ok(Json(products))
}

/// List products priced at or above a limit
#[utoipa::path(
    get,
    path = "/price/min/{min_price}",
    tag = "Products",
    params(
        ("min_price" = String, Path, description = "Inclusive lower bound, e.g. `50.00`")
    ),
    responses(
        (status = 200, description = "Products at or above the price", body = Vec<Product>),
        (status = 400, response = BadRequestParameterResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_by_min_price<R: ProductRepository>(
    State(service): SharedService<R>,
    Path(min_price): Path<String>,
) -> Result<Json<Vec<Product>>, AppError> {
    let min_price: Decimal = parse_param("min_price", &min_price)?;
    let products = service.list_by_min_price(min_price).await?;
    Ok(Json(products))
}

/// List products within a price range
#[utoipa::path(
    get,
    path = "/price/range",
    tag = "Products",
    params(PriceRangeQuery),
    responses(
        (status = 200, description = "Products within the range", body = Vec<Product>),
        (status = 400, response = BadRequestParameterResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_by_price_range<R: ProductRepository>(
    State(service): SharedService<R>,
    QueryParams(query): QueryParams<PriceRangeQuery>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service
        .list_by_price_range(query.min_price, query.max_price)
        .await?;
    Ok(Json(products))
}

/// List products in a category within a price range
#[utoipa::path(
    get,
    path = "/price/range/category/{category}",
    tag = "Products",
    params(
        ("category" = ProductCategory, Path, description = "Product category"),
        PriceRangeQuery
    ),
    responses(
        (status = 200, description = "Products in the category within the range", body = Vec<Product>),
        (status = 400, response = BadRequestParameterResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_by_price_range_and_category<R: ProductRepository>(
    State(service): SharedService<R>,
    Path(category): Path<String>,
    QueryParams(query): QueryParams<PriceRangeQuery>,
) -> Result<Json<Vec<Product>>, AppError> {
    let category: ProductCategory = parse_param("category", &category)?;
    let products = service
        .list_by_price_range_and_category(query.min_price, query.max_price, category)
        .await?;
    Ok(Json(products))
}

/// List available products running low on stock
#[utoipa::path(
    get,
    path = "/low-stock",
    tag = "Products",
    responses(
        (status = 200, description = "Available products with fewer than 10 units", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_low_stock<R: ProductRepository>(
    State(service): SharedService<R>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_low_stock().await?;
    Ok(Json(products))
}

/// List the most expensive products
#[utoipa::path(
    get,
    path = "/most-expensive",
    tag = "Products",
    responses(
        (status = 200, description = "Every product tied at the highest price", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_most_expensive<R: ProductRepository>(
    State(service): SharedService<R>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_most_expensive().await?;
    Ok(Json(products))
}

/// List products created in the last 7 days
#[utoipa::path(
    get,
    path = "/recent",
    tag = "Products",
    responses(
        (status = 200, description = "Recently created products", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_recent<R: ProductRepository>(
    State(service): SharedService<R>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_recent().await?;
    Ok(Json(products))
}
