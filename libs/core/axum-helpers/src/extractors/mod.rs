//! Custom extractors for Axum handlers.
//!
//! Each extractor rejects with an [`AppError`](crate::errors::AppError) so
//! malformed input renders the same JSON error body as domain failures.

pub mod params;
pub mod uuid_path;
pub mod validated_json;

pub use params::{QueryParams, parse_param};
pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
