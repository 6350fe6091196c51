use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found with id: {0}")]
    NotFound(Uuid),

    #[error("User not found with {field}: {value}")]
    NotFoundBy { field: &'static str, value: String },

    /// A unique field (`username` or `email`) is already held by another user
    #[error("User with {field} '{value}' already exists")]
    Conflict { field: &'static str, value: String },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    pub fn username_taken(username: impl Into<String>) -> Self {
        Self::Conflict {
            field: "username",
            value: username.into(),
        }
    }

    pub fn email_taken(email: impl Into<String>) -> Self {
        Self::Conflict {
            field: "email",
            value: email.into(),
        }
    }
}

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) | UserError::NotFoundBy { .. } => {
                AppError::NotFound(err.to_string())
            }
            UserError::Conflict { .. } => AppError::Conflict(err.to_string()),
            UserError::Validation(msg) => AppError::BadRequest(msg),
            UserError::PasswordHash(msg) => AppError::InternalServerError(msg),
            UserError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (UserError::NotFound(Uuid::nil()), StatusCode::NOT_FOUND),
            (
                UserError::NotFoundBy {
                    field: "username",
                    value: "ghost".into(),
                },
                StatusCode::NOT_FOUND,
            ),
            (UserError::username_taken("alice"), StatusCode::CONFLICT),
            (UserError::Validation("bad date".into()), StatusCode::BAD_REQUEST),
            (
                UserError::PasswordHash("salt".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_conflict_message_names_field() {
        assert_eq!(
            UserError::email_taken("a@x.com").to_string(),
            "User with email 'a@x.com' already exists"
        );
    }
}
