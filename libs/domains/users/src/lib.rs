//! User accounts and authentication.
//!
//! Provides the account model, argon2 password hashing, login and
//! registration services, and the HTTP handlers that expose them.

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use handlers::{router, ApiDoc};
pub use models::{LoginRequest, RegisterRequest, Role, User, UserResponse};
pub use mongodb::MongoUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
