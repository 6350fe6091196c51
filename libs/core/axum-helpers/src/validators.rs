//! Field validators shared by request DTOs.

use std::borrow::Cow;
use validator::ValidationError;

/// Rejects strings that are empty or whitespace only.
///
/// ```ignore
/// #[validate(custom(function = "axum_helpers::validators::not_blank"))]
/// pub username: String,
/// ```
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be blank")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("alice").is_ok());
        assert!(not_blank(" a ").is_ok());
        assert!(not_blank("").is_err());
        assert_eq!(not_blank("   ").unwrap_err().code, "blank");
    }
}
