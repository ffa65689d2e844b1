use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::Arc;

use crate::error::{UserError, UserResult};
use crate::models::{normalize_email, LoginRequest, RegisterRequest, Role, User, UserResponse};
use crate::repository::UserRepository;

/// Well-formed argon2id digest that no password verifies against.
/// Login runs a verification against this when no account matches the
/// email, so both failure paths cost the same and timing does not
/// reveal which emails are registered.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$MDEyMzQ1Njc4OWFiY2RlZg$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Service layer for account business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Register a new account with the given role.
    ///
    /// The role is chosen by the caller (the handler decides based on
    /// which endpoint was hit), never taken from the request body.
    pub async fn register(&self, input: RegisterRequest, role: Role) -> UserResult<UserResponse> {
        let email = normalize_email(&input.email);

        if self.repository.email_exists(&email).await? {
            return Err(UserError::DuplicateEmail(email));
        }

        let password_hash = self.hash_password(&input.password)?;
        let user = User::new(email, password_hash, role);

        // The unique email index catches registrations that race past
        // the existence check above.
        let created = self.repository.insert(user).await?;
        Ok(created.into())
    }

    /// Verify credentials and return the account on success.
    ///
    /// Unknown email and wrong password are indistinguishable to the
    /// caller: both return `InvalidCredentials`, and the unknown-email
    /// path still performs a full argon2 verification.
    pub async fn login(&self, input: LoginRequest) -> UserResult<UserResponse> {
        let email = normalize_email(&input.email);

        match self.repository.find_by_email(&email).await? {
            Some(user) => {
                if self.verify_password(&input.password, &user.password_hash)? {
                    Ok(user.into())
                } else {
                    Err(UserError::InvalidCredentials)
                }
            }
            None => {
                let _ = self.verify_password(&input.password, DUMMY_HASH)?;
                Err(UserError::InvalidCredentials)
            }
        }
    }

    // Password helpers

    fn hash_password(&self, password: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }

    fn verify_password(&self, password: &str, hash: &str) -> UserResult<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryUserRepository;

    fn service() -> UserService<InMemoryUserRepository> {
        UserService::new(InMemoryUserRepository::new())
    }

    fn register_request(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_dummy_hash_is_parseable() {
        assert!(PasswordHash::new(DUMMY_HASH).is_ok());
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let service = service();

        let created = service
            .register(register_request("ada@example.com", "correct horse"), Role::User)
            .await
            .unwrap();
        assert_eq!(created.email, "ada@example.com");
        assert_eq!(created.role, Role::User);

        let logged_in = service
            .login(login_request("ada@example.com", "correct horse"))
            .await
            .unwrap();
        assert_eq!(logged_in.id, created.id);
    }

    #[tokio::test]
    async fn test_email_is_normalized_for_storage_and_lookup() {
        let service = service();

        let created = service
            .register(register_request("  Ada@Example.COM ", "correct horse"), Role::User)
            .await
            .unwrap();
        assert_eq!(created.email, "ada@example.com");

        // Different casing still resolves to the same account
        let logged_in = service
            .login(login_request("ADA@example.com", "correct horse"))
            .await
            .unwrap();
        assert_eq!(logged_in.id, created.id);

        // And a re-registration with different casing is a duplicate
        let result = service
            .register(register_request("ada@EXAMPLE.com", "another pass"), Role::User)
            .await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_are_indistinguishable() {
        let service = service();

        service
            .register(register_request("ada@example.com", "correct horse"), Role::User)
            .await
            .unwrap();

        let wrong_password = service
            .login(login_request("ada@example.com", "wrong horse"))
            .await;
        let unknown_email = service
            .login(login_request("ghost@example.com", "correct horse"))
            .await;

        assert!(matches!(wrong_password, Err(UserError::InvalidCredentials)));
        assert!(matches!(unknown_email, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_register_assigns_caller_chosen_role() {
        let service = service();

        let admin = service
            .register(register_request("root@example.com", "correct horse"), Role::Admin)
            .await
            .unwrap();
        assert_eq!(admin.role, Role::Admin);
    }
}
