//! Catalog API routes
//!
//! Wires the products domain to HTTP routes.

use axum::Router;
use domain_products::{handlers, MongoProductRepository, ProductResult, ProductService};
use mongodb::Database;

use crate::state::AppState;

/// Create the catalog router backed by MongoDB
pub fn router(state: &AppState) -> Router {
    let repository = MongoProductRepository::new(&state.db);
    let service = ProductService::new(repository);

    handlers::router(service)
}

/// Ensure listing indexes exist before serving traffic
pub async fn init_indexes(db: &Database) -> ProductResult<()> {
    MongoProductRepository::new(db).init_indexes().await
}
