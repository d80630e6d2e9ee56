//! Custom Axum extractors

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sqlx::PgPool;

use super::context::pool_from_extensions;
use super::error::ApiError;

/// Extract the pool attached by the database middleware.
///
/// Rejects with a 500 when the route was mounted without
/// [`with_database`](super::with_database).
pub struct DbPool(pub PgPool);

impl<S> FromRequestParts<S> for DbPool
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let pool = pool_from_extensions(&parts.extensions)?;
        Ok(Self(pool))
    }
}
