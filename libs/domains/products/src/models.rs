use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Product lifecycle status
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
pub enum ProductStatus {
    #[default]
    Active,
    Inactive,
}

/// Catalog record as stored in the `products` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier (stored as the Mongo `_id`)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Free-text category label
    pub category: String,
    /// Unit price in currency units, at most two decimal places
    pub price: f64,
    /// Lifecycle status
    pub status: ProductStatus,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn new(input: CreateProduct) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            category: input.category,
            price: input.price,
            status: input.status,
            created_at: Utc::now(),
        }
    }

    /// Apply a partial update; absent fields keep their current value.
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }
}

/// DTO for creating a product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    #[validate(custom(function = validate_price))]
    pub price: f64,
    /// Defaults to `active` when omitted
    #[serde(default)]
    pub status: ProductStatus,
}

/// DTO for a partial product update; the target id travels in the body
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    pub id: Uuid,
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
    #[validate(custom(function = validate_price))]
    pub price: Option<f64>,
    pub status: Option<ProductStatus>,
}

/// DTO for deleting a product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct DeleteProduct {
    pub id: Uuid,
}

/// Prices must be positive and representable in whole cents.
pub fn validate_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(ValidationError::new("price_must_be_positive"));
    }

    let cents = price * 100.0;
    if (cents - cents.round()).abs() > 1e-9 {
        return Err(ValidationError::new("price_max_two_decimals"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input() -> CreateProduct {
        CreateProduct {
            name: "Espresso".to_string(),
            category: "beverages".to_string(),
            price: 2.5,
            status: ProductStatus::default(),
        }
    }

    #[test]
    fn test_new_product_defaults_to_active() {
        let product = Product::new(create_input());
        assert_eq!(product.status, ProductStatus::Active);
        assert_eq!(product.price, 2.5);
    }

    #[test]
    fn test_apply_update_is_partial() {
        let mut product = Product::new(create_input());
        let original_name = product.name.clone();

        product.apply_update(UpdateProduct {
            id: product.id,
            name: None,
            category: None,
            price: Some(3.75),
            status: None,
        });

        assert_eq!(product.name, original_name);
        assert_eq!(product.category, "beverages");
        assert_eq!(product.price, 3.75);
        assert_eq!(product.status, ProductStatus::Active);
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(0.01).is_ok());
        assert!(validate_price(19.99).is_ok());
        assert!(validate_price(100.0).is_ok());

        assert!(validate_price(0.0).is_err());
        assert!(validate_price(-1.0).is_err());
        assert!(validate_price(1.999).is_err());
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
    }

    #[test]
    fn test_create_product_rejects_bad_price() {
        let input = CreateProduct {
            price: 1.234,
            ..create_input()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(ProductStatus::Inactive).unwrap(),
            serde_json::json!("inactive")
        );
        assert_eq!(ProductStatus::Active.to_string(), "active");
    }
}
