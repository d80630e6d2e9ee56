//! Request-scoped database pool propagation
//!
//! [`attach_pool`] asks the [`ConnectionProvider`] for the shared pool and
//! stores it in the request extensions. Handlers read it back with
//! [`pool_from_extensions`] (or the [`DbPool`](super::DbPool) extractor).
//!
//! The extension key is the private `RequestPool` type, so nothing outside
//! this module can insert, replace or shadow it.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::Extensions;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::Router;
use sqlx::PgPool;

use super::error::ApiError;
use crate::db::ConnectionProvider;

/// Extension key carrying the pool for one request.
#[derive(Clone)]
struct RequestPool(PgPool);

/// The request reached a handler without a pool attached.
#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("no database pool attached to the request")]
pub struct MissingConnectionError;

/// Middleware: attach the provider's pool to the request, then run `next`.
///
/// If the provider fails the request is answered with a 500 and `next` is
/// never invoked.
pub async fn attach_pool(
    State(provider): State<Arc<dyn ConnectionProvider>>,
    mut request: Request,
    next: Next,
) -> Response {
    let pool = match provider.pool().await {
        Ok(pool) => pool,
        Err(e) => return ApiError::Connect(e).into_response(),
    };

    request.extensions_mut().insert(RequestPool(pool));
    next.run(request).await
}

/// Wrap every route registered on `router` with [`attach_pool`].
///
/// Applied as a route layer, so unmatched paths never touch the provider.
pub fn with_database<S>(router: Router<S>, provider: Arc<dyn ConnectionProvider>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(provider, attach_pool))
}

/// Look up the pool attached by [`attach_pool`].
pub fn pool_from_extensions(extensions: &Extensions) -> Result<PgPool, MissingConnectionError> {
    extensions
        .get::<RequestPool>()
        .map(|attached| attached.0.clone())
        .ok_or(MissingConnectionError)
}
