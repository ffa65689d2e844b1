//! HTTP handlers for the catalog API

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
    },
    Envelope, ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{CreateProduct, DeleteProduct, Product, ProductStatus, UpdateProduct};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for the catalog API
#[derive(OpenApi)]
#[openapi(
    paths(list_products, create_product, update_product, delete_product),
    components(
        schemas(
            Product, CreateProduct, UpdateProduct, DeleteProduct, ProductStatus,
            Envelope<Product>, Envelope<Vec<Product>>
        ),
        responses(
            BadRequestValidationResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog management")
    )
)]
pub struct ApiDoc;

/// Create the catalog router.
///
/// All four operations live on `/product`; update and delete carry the
/// target id in the JSON body rather than the path.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/product",
            get(list_products)
                .post(create_product)
                .put(update_product)
                .delete(delete_product),
        )
        .with_state(shared_service)
}

/// List the whole catalog, newest first
#[utoipa::path(
    get,
    path = "/product",
    tag = "Products",
    responses(
        (status = 200, description = "Catalog entries, newest first", body = Envelope<Vec<Product>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Envelope<Vec<Product>>>> {
    let products = service.list_products().await?;
    Ok(Json(Envelope::new(products)))
}

/// Create a new catalog entry
#[utoipa::path(
    post,
    path = "/product",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = Envelope<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(Envelope::new(product))))
}

/// Apply a partial update to an existing product
#[utoipa::path(
    put,
    path = "/product",
    tag = "Products",
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Envelope<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<Envelope<Product>>> {
    let product = service.update_product(input).await?;
    Ok(Json(Envelope::new(product)))
}

/// Delete a product, returning its last-known record
#[utoipa::path(
    delete,
    path = "/product",
    tag = "Products",
    request_body = DeleteProduct,
    responses(
        (status = 200, description = "Product deleted", body = Envelope<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<DeleteProduct>,
) -> ProductResult<Json<Envelope<Product>>> {
    let product = service.delete_product(input).await?;
    Ok(Json(Envelope::new(product)))
}
