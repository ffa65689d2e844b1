//! API routes module
//!
//! Wires the domain routers and readiness endpoint into one tree.
//! All routes are mounted at the root of the app.

pub mod auth;
pub mod health;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(auth::router(state))
        .merge(products::router(state))
        .merge(health::router(state.clone()))
}
