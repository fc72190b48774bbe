use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::{AppError, NOT_FOUND_MESSAGE};

/// Primary key taken from the `{id}` path segment.
///
/// Only plain decimal digits match; anything else, including values that do
/// not fit an `i32`, is treated as an unknown route and answered with 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoId(pub i32);

impl<S> FromRequestParts<S> for TodoId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::not_found(NOT_FOUND_MESSAGE))?;
        parse_id(&raw)
            .map(TodoId)
            .ok_or_else(|| AppError::not_found(NOT_FOUND_MESSAGE))
    }
}

fn parse_id(raw: &str) -> Option<i32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
