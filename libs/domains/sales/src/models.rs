use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Payment method recorded when a cart is settled
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Transfer,
}

/// One scanned item in a cart.
///
/// Name and unit price are snapshotted at scan time, so later catalog
/// edits don't change a cart already in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct SaleLine {
    /// Catalog id of the scanned product
    pub product_id: Uuid,
    /// Product name at scan time
    pub name: String,
    /// Units of this product
    #[validate(range(min = 1))]
    pub quantity: u32,
    /// Unit price at scan time
    pub unit_price: f64,
}

impl SaleLine {
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// An in-progress or settled cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Sale {
    #[validate(length(min = 1), nested)]
    pub lines: Vec<SaleLine>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

impl Sale {
    pub fn total(&self) -> f64 {
        self.lines.iter().map(SaleLine::line_total).sum()
    }
}
