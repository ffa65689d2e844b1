//! Application state management.
//!
//! The state contains the loaded configuration and the MongoDB client;
//! both are cheap to clone (the client shares its connection pool).

use mongodb::{Client, Database};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client (cloneable, shares underlying connection pool)
    pub mongo_client: Client,
    /// MongoDB database instance
    pub db: Database,
}
