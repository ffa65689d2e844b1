use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::User;

/// Repository trait for account persistence.
///
/// The login and registration flows each perform at most one read and
/// one write through this trait, so implementations stay cheap under
/// concurrent request load.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account. Fails with `DuplicateEmail` if the
    /// (normalized) email is already taken.
    async fn insert(&self, user: User) -> UserResult<User>;

    /// Look up an account by its normalized email
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// Check whether a normalized email is already registered
    async fn email_exists(&self, email: &str) -> UserResult<bool>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.email) {
            return Err(UserError::DuplicateEmail(user.email));
        }

        users.insert(user.email.clone(), user.clone());

        tracing::info!(user_id = %user.id, email = %user.email, "Created account");
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(email).cloned())
    }

    async fn email_exists(&self, email: &str) -> UserResult<bool> {
        let users = self.users.read().await;
        Ok(users.contains_key(email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn user(email: &str) -> User {
        User::new(email.to_string(), "hashed_password".to_string(), Role::User)
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = InMemoryUserRepository::new();

        let created = repo.insert(user("ada@example.com")).await.unwrap();
        assert_eq!(created.email, "ada@example.com");

        let fetched = repo.find_by_email("ada@example.com").await.unwrap();
        assert_eq!(fetched.unwrap().id, created.id);

        assert!(repo.email_exists("ada@example.com").await.unwrap());
        assert!(!repo.email_exists("none@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_email_error() {
        let repo = InMemoryUserRepository::new();

        repo.insert(user("ada@example.com")).await.unwrap();

        let result = repo.insert(user("ada@example.com")).await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }
}
