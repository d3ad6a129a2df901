use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{NewUser, User};

/// Repository trait for User persistence
///
/// Implementations report failures through [`RepositoryError`] only, so any
/// storage technology can sit behind it without the service noticing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user, assigning its id and timestamps
    async fn create(&self, user: NewUser) -> RepositoryResult<User>;

    /// Get a user by ID
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<User>;

    /// List all users, oldest first
    async fn find_all(&self) -> RepositoryResult<Vec<User>>;

    /// Replace name, email and password hash of an existing user
    async fn update(&self, user: User) -> RepositoryResult<User>;

    /// Delete a user by ID
    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

fn same_email(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> RepositoryResult<User> {
        let mut users = self.users.write().await;

        if users.values().any(|u| same_email(&u.email, &user.email)) {
            return Err(RepositoryError::DuplicateEmail(user.email));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<User> {
        let users = self.users.read().await;
        users.get(&id).cloned().ok_or(RepositoryError::NotFound(id))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<User>> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users.values().cloned().collect();
        // UUIDv7 ids break ties between users created in the same instant
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        Ok(result)
    }

    async fn update(&self, user: User) -> RepositoryResult<User> {
        let mut users = self.users.write().await;

        if users
            .values()
            .any(|u| u.id != user.id && same_email(&u.email, &user.email))
        {
            return Err(RepositoryError::DuplicateEmail(user.email));
        }

        let stored = users
            .get_mut(&user.id)
            .ok_or(RepositoryError::NotFound(user.id))?;

        stored.name = user.name;
        stored.email = user.email;
        stored.password_hash = user.password_hash;
        stored.touch();

        tracing::info!(user_id = %stored.id, "Updated user");
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let mut users = self.users.write().await;

        match users.remove(&id) {
            Some(_) => {
                tracing::info!(user_id = %id, "Deleted user");
                Ok(())
            }
            None => Err(RepositoryError::NotFound(id)),
        }
    }
}
