use axum::extract::{FromRequest, FromRequestParts, Path};
use axum::http::request::Parts;

use chirp_core::AppError;

use crate::error::ApiError;

/// `axum::Json` whose rejections go through the error translator.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// The `{id}` path segment of a tweet route.
///
/// Only ASCII digits match; any other segment is treated as an unknown route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TweetId(pub i64);

impl<S> FromRequestParts<S> for TweetId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::RouteNotFound)?;

        Ok(TweetId(parse_tweet_id(&raw)?))
    }
}

/// Parse a digits-only id segment.
///
/// Digit strings too large for an `i64` can never have been issued, so they
/// resolve to a missing tweet rather than a routing failure.
pub fn parse_tweet_id(raw: &str) -> Result<i64, AppError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::RouteNotFound);
    }
    raw.parse().map_err(|_| AppError::tweet_not_found(raw))
}
