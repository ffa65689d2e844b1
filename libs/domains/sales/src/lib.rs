//! Sale shapes for in-progress checkouts.
//!
//! A sale is assembled client-side while the cashier scans items; the
//! server only defines the shared shapes and their arithmetic. Nothing
//! here persists: abandoning a cart costs nothing.

pub mod models;

pub use models::{PaymentMethod, Sale, SaleLine};
