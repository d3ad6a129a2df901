use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, NewUser, UpdateUser, User};
use crate::password::PasswordHasher;
use crate::repository::UserRepository;

/// Service layer for User business logic
///
/// Stateless between calls: the repository is shared behind an `Arc`, so a
/// single instance can serve concurrent requests without extra locking.
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    hasher: PasswordHasher,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self::with_hasher(repository, PasswordHasher::default())
    }

    pub fn with_hasher(repository: R, hasher: PasswordHasher) -> Self {
        Self {
            repository: Arc::new(repository),
            hasher,
        }
    }

    /// Create a new user with password hashing
    #[instrument(skip(self, input))]
    pub async fn create_user(&self, input: CreateUser) -> UserResult<User> {
        Self::validate_create(&input)?;

        let password_hash = self.hasher.hash(&input.password)?;

        let user = self
            .repository
            .create(NewUser {
                name: input.name,
                email: input.email,
                password_hash,
            })
            .await?;

        Ok(user)
    }

    /// Get a user by ID
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: Uuid) -> UserResult<User> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// List all users
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        Ok(self.repository.find_all().await?)
    }

    /// Update name and/or email of an existing user.
    ///
    /// Reads the current record, merges the patch and writes it back. There
    /// is no version check, so concurrent updates of the same user resolve
    /// as last writer wins.
    #[instrument(skip(self, input))]
    pub async fn update_user(&self, id: Uuid, input: UpdateUser) -> UserResult<User> {
        Self::validate_update(&input)?;

        let mut user = self.repository.find_by_id(id).await?;
        user.apply_update(input);

        Ok(self.repository.update(user).await?)
    }

    /// Delete a user
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: Uuid) -> UserResult<()> {
        Ok(self.repository.delete(id).await?)
    }

    /// Check a plaintext password against the user's stored hash
    pub fn verify_password(&self, user: &User, password: &str) -> UserResult<bool> {
        self.hasher.verify(password, &user.password_hash)
    }

    fn validate_create(input: &CreateUser) -> UserResult<()> {
        if input.email.trim().is_empty() {
            return Err(UserError::Validation("Email is required".to_string()));
        }
        if input.password.is_empty() {
            return Err(UserError::Validation("Password is required".to_string()));
        }

        input.validate()?;
        Ok(())
    }

    fn validate_update(input: &UpdateUser) -> UserResult<()> {
        if input
            .email
            .as_deref()
            .is_some_and(|email| email.trim().is_empty())
        {
            return Err(UserError::Validation("Email cannot be empty".to_string()));
        }

        input.validate()?;
        Ok(())
    }
}
