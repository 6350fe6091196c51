use axum_helpers::validators::not_blank;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Minimum length of a plaintext password.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Account status
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

/// User entity as held by the store
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Login name (unique, case-sensitive)
    pub username: String,
    /// Email address (unique, case-sensitive)
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Argon2 password hash (never exposed in API responses)
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub status: UserStatus,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// User response DTO (without password_hash)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            status: user.status,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// DTO for creating a new user
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(custom(function = "not_blank", message = "Username is required"))]
    pub username: String,
    #[validate(custom(function = "not_blank", message = "Email is required"))]
    pub email: String,
    #[validate(custom(function = "not_blank", message = "First name is required"))]
    #[serde(alias = "firstName")]
    pub first_name: String,
    #[validate(custom(function = "not_blank", message = "Last name is required"))]
    #[serde(alias = "lastName")]
    pub last_name: String,
    #[validate(length(
        min = 6,
        message = "Password must be at least 6 characters"
    ))]
    pub password: String,
    /// Defaults to `ACTIVE`
    #[serde(default)]
    pub status: Option<UserStatus>,
}

/// DTO for replacing a user's mutable fields
///
/// Every field except `password` is overwritten. An absent or empty
/// password keeps the stored hash.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(custom(function = "not_blank", message = "Username is required"))]
    pub username: String,
    #[validate(custom(function = "not_blank", message = "Email is required"))]
    pub email: String,
    #[validate(custom(function = "not_blank", message = "First name is required"))]
    #[serde(alias = "firstName")]
    pub first_name: String,
    #[validate(custom(function = "not_blank", message = "Last name is required"))]
    #[serde(alias = "lastName")]
    pub last_name: String,
    #[serde(default)]
    #[validate(custom(function = "optional_password"))]
    pub password: Option<String>,
    pub status: UserStatus,
}

impl UpdateUser {
    /// The replacement password, if one was supplied.
    pub fn new_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}

fn optional_password(password: &str) -> Result<(), ValidationError> {
    if !password.is_empty() && password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::new("length")
            .with_message(Cow::Borrowed("Password must be at least 6 characters")));
    }
    Ok(())
}

/// Query string for `GET /users/search/firstname`
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FirstNameQuery {
    /// Case-insensitive substring
    #[serde(alias = "firstName")]
    pub first_name: String,
}

/// Query string for `GET /users/search/lastname`
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LastNameQuery {
    /// Case-insensitive substring
    #[serde(alias = "lastName")]
    pub last_name: String,
}

/// Query string for `GET /users/created-after`
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CreatedAfterQuery {
    /// RFC 3339 timestamp, or `YYYY-MM-DDTHH:MM:SS` read as UTC
    pub date: String,
}

/// Store-level predicate for list queries. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub status: Option<UserStatus>,
    pub first_name_contains: Option<String>,
    pub last_name_contains: Option<String>,
    pub created_after: Option<DateTime<Utc>>,
    pub email_domain: Option<String>,
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        self.status.is_none_or(|status| user.status == status)
            && self
                .first_name_contains
                .as_deref()
                .is_none_or(|needle| contains_ignore_case(&user.first_name, needle))
            && self
                .last_name_contains
                .as_deref()
                .is_none_or(|needle| contains_ignore_case(&user.last_name, needle))
            && self.created_after.is_none_or(|after| user.created_at >= after)
            && self
                .email_domain
                .as_deref()
                .is_none_or(|domain| user.email.ends_with(domain))
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl User {
    /// Create a new user (password will be hashed by service layer)
    pub fn new(input: CreateUser, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            username: input.username,
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            password_hash,
            status: input.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite mutable fields (password should already be hashed if provided)
    pub fn apply_update(&mut self, update: UpdateUser, new_password_hash: Option<String>) {
        self.username = update.username;
        self.email = update.email;
        self.first_name = update.first_name;
        self.last_name = update.last_name;
        self.status = update.status;
        if let Some(hash) = new_password_hash {
            self.password_hash = hash;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input() -> CreateUser {
        CreateUser {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            password: "secret1".to_string(),
            status: None,
        }
    }

    #[test]
    fn test_status_defaults_to_active() {
        let user = User::new(create_input(), "hash".to_string());
        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_status_parses_case_insensitively() {
        assert_eq!("suspended".parse::<UserStatus>().unwrap(), UserStatus::Suspended);
        assert_eq!("ACTIVE".parse::<UserStatus>().unwrap(), UserStatus::Active);
        assert!("SLEEPING".parse::<UserStatus>().is_err());
        assert_eq!(UserStatus::Inactive.to_string(), "INACTIVE");
    }

    #[test]
    fn test_create_validation() {
        assert!(create_input().validate().is_ok());

        let mut input = create_input();
        input.username = "   ".to_string();
        input.password = "short".to_string();
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_update_password_rules() {
        let mut update = UpdateUser {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            password: Some(String::new()),
            status: UserStatus::Active,
        };
        assert!(update.validate().is_ok());
        assert_eq!(update.new_password(), None);

        update.password = Some("abc".to_string());
        assert!(update.validate().is_err());

        update.password = Some("abcdef".to_string());
        assert!(update.validate().is_ok());
        assert_eq!(update.new_password(), Some("abcdef"));
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let user = User::new(create_input(), "argon-hash".to_string());
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["status"], "ACTIVE");
    }

    #[test]
    fn test_filter_email_domain_is_suffix_match() {
        let user = User::new(create_input(), "hash".to_string());
        let filter = UserFilter {
            email_domain: Some("x.com".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&user));

        let filter = UserFilter {
            email_domain: Some("x.co".to_string()),
            ..Default::default()
        };
        assert!(!filter.matches(&user));
    }

    #[test]
    fn test_filter_name_search_ignores_case() {
        let mut input = create_input();
        input.first_name = "Johnathan".to_string();
        let user = User::new(input, "hash".to_string());

        let filter = UserFilter {
            first_name_contains: Some("JOHN".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&user));
    }
}
