//! # Axum Helpers
//!
//! A collection of utilities, middleware, and helpers for building Axum web applications.
//!
//! ## Modules
//!
//! - **[`errors`]**: the `{success, data|error}` response envelope and `AppError`
//! - **[`extractors`]**: custom extractors (validated JSON)
//! - **[`http`]**: HTTP middleware (security headers)
//! - **[`server`]**: server setup, health endpoint, graceful shutdown
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_routes = Router::new(); // Add your routes
//!     let router = create_router::<ApiDoc>(api_routes).await?;
//!
//!     let config = ServerConfig::default();
//!     create_app(router, &config).await?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;
pub mod shutdown;

// Re-export server types
pub use server::{
    create_app, create_production_app, create_router, health_router, HealthResponse,
};
pub use shutdown::{shutdown_signal, ShutdownCoordinator};

// Re-export HTTP middleware
pub use http::security_headers;

// Re-export error types
pub use errors::{AppError, Envelope, ErrorBody, ErrorResponse};

// Re-export extractors
pub use extractors::ValidatedJson;
