//! Query-string and scalar path parameter helpers.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use std::{fmt::Display, str::FromStr};

/// `Query<T>` that rejects with a 400 `INVALID_PARAMETER` JSON body.
///
/// Missing required fields and unparsable values (e.g. `min_price=abc`) both
/// land here instead of axum's plain-text rejection.
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()).into_response())?;

        Ok(QueryParams(params))
    }
}

/// Parse a raw path segment, naming the parameter in the error message.
///
/// ```ignore
/// let status: UserStatus = parse_param("status", &raw)?;
/// ```
pub fn parse_param<T>(name: &str, raw: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|e| AppError::BadRequest(format!("Invalid {} '{}': {}", name, raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param_ok() {
        let value: i32 = parse_param("stock_quantity", " 42 ").unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_param_error_names_parameter() {
        let err = parse_param::<i32>("stock_quantity", "lots").unwrap_err();
        assert!(err.to_string().contains("stock_quantity"));
        assert!(err.to_string().contains("lots"));
    }
}
