use std::sync::Arc;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, DeleteProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Service layer for catalog business logic
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new catalog entry (input already validated at the boundary)
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = Product::new(input);
        self.repository.create(product).await
    }

    /// List the whole catalog, newest first
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list_all().await
    }

    /// Apply a partial update to an existing product.
    ///
    /// Confirms the record exists before writing so a missing id maps
    /// cleanly to `NotFound` rather than an upsert.
    pub async fn update_product(&self, input: UpdateProduct) -> ProductResult<Product> {
        let mut product = self.require_product(input.id).await?;

        product.apply_update(input);
        self.repository.replace(product).await
    }

    /// Delete a product and return its last-known record
    pub async fn delete_product(&self, input: DeleteProduct) -> ProductResult<Product> {
        let product = self.require_product(input.id).await?;

        if !self.repository.delete(input.id).await? {
            // Raced with a concurrent delete
            return Err(ProductError::NotFound(input.id));
        }

        Ok(product)
    }

    async fn require_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductStatus;
    use crate::repository::MockProductRepository;
    use mockall::predicate::eq;

    fn sample_product() -> Product {
        Product::new(CreateProduct {
            name: "Espresso".to_string(),
            category: "beverages".to_string(),
            price: 2.5,
            status: ProductStatus::Active,
        })
    }

    #[tokio::test]
    async fn test_create_product_stamps_identity() {
        let mut repo = MockProductRepository::new();
        repo.expect_create().returning(Ok);

        let service = ProductService::new(repo);
        let created = service
            .create_product(CreateProduct {
                name: "Espresso".to_string(),
                category: "beverages".to_string(),
                price: 2.5,
                status: ProductStatus::Active,
            })
            .await
            .unwrap();

        assert_eq!(created.name, "Espresso");
        assert!(!created.id.is_nil());
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let id = Uuid::now_v7();

        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id()
            .with(eq(id))
            .returning(|_| Ok(None));
        repo.expect_replace().never();

        let service = ProductService::new(repo);
        let result = service
            .update_product(UpdateProduct {
                id,
                name: None,
                category: None,
                price: Some(3.0),
                status: None,
            })
            .await;

        assert!(matches!(result, Err(ProductError::NotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_update_merges_partial_fields() {
        let existing = sample_product();
        let id = existing.id;

        let mut repo = MockProductRepository::new();
        {
            let existing = existing.clone();
            repo.expect_get_by_id()
                .with(eq(id))
                .returning(move |_| Ok(Some(existing.clone())));
        }
        repo.expect_replace().returning(Ok);

        let service = ProductService::new(repo);
        let updated = service
            .update_product(UpdateProduct {
                id,
                name: None,
                category: None,
                price: Some(3.75),
                status: None,
            })
            .await
            .unwrap();

        assert_eq!(updated.price, 3.75);
        assert_eq!(updated.name, existing.name);
        assert_eq!(updated.status, existing.status);
    }

    #[tokio::test]
    async fn test_delete_returns_last_known_record() {
        let existing = sample_product();
        let id = existing.id;

        let mut repo = MockProductRepository::new();
        {
            let existing = existing.clone();
            repo.expect_get_by_id()
                .with(eq(id))
                .returning(move |_| Ok(Some(existing.clone())));
        }
        repo.expect_delete().with(eq(id)).returning(|_| Ok(true));

        let service = ProductService::new(repo);
        let deleted = service.delete_product(DeleteProduct { id }).await.unwrap();

        assert_eq!(deleted.id, id);
        assert_eq!(deleted.name, existing.name);
    }

    #[tokio::test]
    async fn test_delete_missing_product_is_not_found() {
        let id = Uuid::now_v7();

        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id()
            .with(eq(id))
            .returning(|_| Ok(None));
        repo.expect_delete().never();

        let service = ProductService::new(repo);
        let result = service.delete_product(DeleteProduct { id }).await;

        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }
}
