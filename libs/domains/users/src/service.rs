use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User, UserFilter, UserResponse, UserStatus};
use crate::repository::UserRepository;

/// Service layer for User business logic
///
/// Enforces username/email uniqueness (username checked first), applies the
/// default `ACTIVE` status and hashes passwords before they reach the store.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new user with password hashing
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn create_user(&self, input: CreateUser) -> UserResult<UserResponse> {
        if self.repository.exists_by_username(&input.username).await? {
            tracing::warn!("Username already taken");
            return Err(UserError::username_taken(input.username));
        }
        if self.repository.exists_by_email(&input.email).await? {
            tracing::warn!(email = %input.email, "Email already taken");
            return Err(UserError::email_taken(input.email));
        }

        let password_hash = hash_password(&input.password)?;
        let user = User::new(input, password_hash);

        let created = self.repository.create(user).await?;
        tracing::info!(user_id = %created.id, status = %created.status, "Created user");
        Ok(created.into())
    }

    /// Get a user by ID
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: Uuid) -> UserResult<UserResponse> {
        let user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        Ok(user.into())
    }

    #[instrument(skip(self))]
    pub async fn get_user_by_username(&self, username: &str) -> UserResult<UserResponse> {
        let user = self
            .repository
            .get_by_username(username)
            .await?
            .ok_or_else(|| UserError::NotFoundBy {
                field: "username",
                value: username.to_string(),
            })?;

        Ok(user.into())
    }

    #[instrument(skip(self))]
    pub async fn get_user_by_email(&self, email: &str) -> UserResult<UserResponse> {
        let user = self
            .repository
            .get_by_email(email)
            .await?
            .ok_or_else(|| UserError::NotFoundBy {
                field: "email",
                value: email.to_string(),
            })?;

        Ok(user.into())
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self) -> UserResult<Vec<UserResponse>> {
        self.find(UserFilter::default()).await
    }

    #[instrument(skip(self))]
    pub async fn list_users_by_status(&self, status: UserStatus) -> UserResult<Vec<UserResponse>> {
        self.find(UserFilter {
            status: Some(status),
            ..Default::default()
        })
        .await
    }

    /// Same as `list_users_by_status(ACTIVE)`
    pub async fn list_active_users(&self) -> UserResult<Vec<UserResponse>> {
        self.list_users_by_status(UserStatus::Active).await
    }

    /// Replace a user's mutable fields
    ///
    /// Keeping one's own username or email is not a conflict. The password is
    /// re-hashed only when a non-empty one is supplied.
    #[instrument(skip(self, input))]
    pub async fn update_user(&self, id: Uuid, input: UpdateUser) -> UserResult<UserResponse> {
        let mut user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        if input.username != user.username
            && self.repository.exists_by_username(&input.username).await?
        {
            tracing::warn!(username = %input.username, "Username already taken");
            return Err(UserError::username_taken(input.username));
        }
        if input.email != user.email && self.repository.exists_by_email(&input.email).await? {
            tracing::warn!(email = %input.email, "Email already taken");
            return Err(UserError::email_taken(input.email));
        }

        let new_password_hash = input.new_password().map(hash_password).transpose()?;
        user.apply_update(input, new_password_hash);

        let updated = self.repository.update(user).await?;
        tracing::info!(user_id = %updated.id, "Updated user");
        Ok(updated.into())
    }

    /// Hard-delete a user
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: Uuid) -> UserResult<()> {
        if !self.repository.delete(id).await? {
            return Err(UserError::NotFound(id));
        }

        tracing::info!(user_id = %id, "Deleted user");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn search_by_first_name(&self, first_name: &str) -> UserResult<Vec<UserResponse>> {
        self.find(UserFilter {
            first_name_contains: Some(first_name.to_string()),
            ..Default::default()
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn search_by_last_name(&self, last_name: &str) -> UserResult<Vec<UserResponse>> {
        self.find(UserFilter {
            last_name_contains: Some(last_name.to_string()),
            ..Default::default()
        })
        .await
    }

    /// Users whose `created_at` is at or after `since`
    #[instrument(skip(self))]
    pub async fn list_created_after(&self, since: DateTime<Utc>) -> UserResult<Vec<UserResponse>> {
        self.find(UserFilter {
            created_after: Some(since),
            ..Default::default()
        })
        .await
    }

    /// Users whose email ends with `domain`
    #[instrument(skip(self))]
    pub async fn list_by_email_domain(&self, domain: &str) -> UserResult<Vec<UserResponse>> {
        self.find(UserFilter {
            email_domain: Some(domain.to_string()),
            ..Default::default()
        })
        .await
    }

    /// Number of stored users
    pub async fn count(&self) -> UserResult<usize> {
        self.repository.count().await
    }

    async fn find(&self, filter: UserFilter) -> UserResult<Vec<UserResponse>> {
        let users = self.repository.list(filter).await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }
}

fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}
