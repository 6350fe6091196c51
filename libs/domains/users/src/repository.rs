use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserFilter};

/// Repository trait for User persistence
///
/// Implementations own the username/email unique constraints: `create` and
/// `update` must reject a duplicate atomically with the write.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user
    async fn create(&self, user: User) -> UserResult<User>;

    /// Get a user by ID
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Get a user by exact username
    async fn get_by_username(&self, username: &str) -> UserResult<Option<User>>;

    /// Get a user by exact email
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// List users matching the filter, oldest first
    async fn list(&self, filter: UserFilter) -> UserResult<Vec<User>>;

    /// Replace an existing user
    async fn update(&self, user: User) -> UserResult<User>;

    /// Delete a user by ID, returning whether it existed
    async fn delete(&self, id: Uuid) -> UserResult<bool>;

    /// Check if a username is taken
    async fn exists_by_username(&self, username: &str) -> UserResult<bool>;

    /// Check if an email is taken
    async fn exists_by_email(&self, email: &str) -> UserResult<bool>;

    /// Total number of stored users
    async fn count(&self) -> UserResult<usize>;
}

/// In-memory implementation of UserRepository
///
/// Clones share the same underlying map.
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

/// Username is checked before email so the reported field is stable.
fn check_unique<'a>(
    mut others: impl Iterator<Item = &'a User> + Clone,
    candidate: &User,
) -> UserResult<()> {
    if others.clone().any(|u| u.username == candidate.username) {
        return Err(UserError::username_taken(&candidate.username));
    }
    if others.any(|u| u.email == candidate.email) {
        return Err(UserError::email_taken(&candidate.email));
    }
    Ok(())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        check_unique(users.values(), &user)?;
        users.insert(user.id, user.clone());

        tracing::debug!(user_id = %user.id, username = %user.username, "Stored user");
        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn list(&self, filter: UserFilter) -> UserResult<Vec<User>> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users
            .values()
            .filter(|u| filter.matches(u))
            .cloned()
            .collect();

        // Oldest first; v7 ids break ties in insertion order
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        Ok(result)
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(UserError::NotFound(user.id));
        }

        check_unique(users.values().filter(|u| u.id != user.id), &user)?;
        users.insert(user.id, user.clone());

        tracing::debug!(user_id = %user.id, "Replaced user");
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> UserResult<bool> {
        let mut users = self.users.write().await;
        Ok(users.remove(&id).is_some())
    }

    async fn exists_by_username(&self, username: &str) -> UserResult<bool> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.username == username))
    }

    async fn exists_by_email(&self, email: &str) -> UserResult<bool> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.email == email))
    }

    async fn count(&self) -> UserResult<usize> {
        Ok(self.users.read().await.len())
    }
}
