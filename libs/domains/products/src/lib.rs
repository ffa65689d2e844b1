//! Product catalog.
//!
//! CRUD over the catalog collection: free-text categories, decimal
//! prices validated to two places, and newest-first listings.

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use handlers::{router, ApiDoc};
pub use models::{CreateProduct, DeleteProduct, Product, ProductStatus, UpdateProduct};
pub use mongodb::MongoProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
