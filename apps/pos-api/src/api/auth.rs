//! Auth API routes
//!
//! Wires the users domain to HTTP routes.

use axum::Router;
use domain_users::{handlers, MongoUserRepository, UserResult, UserService};
use mongodb::Database;

use crate::state::AppState;

/// Create the auth router backed by MongoDB
pub fn router(state: &AppState) -> Router {
    let repository = MongoUserRepository::new(&state.db);
    let service = UserService::new(repository);

    handlers::router(service, state.config.admin_token.clone())
}

/// Ensure the unique email index exists before serving traffic
pub async fn init_indexes(db: &Database) -> UserResult<()> {
    MongoUserRepository::new(db).init_indexes().await
}
