//! User endpoints

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::Router;

use crate::db::UserRepo;
use crate::http::error::ApiError;
use crate::http::extractors::DbPool;
use crate::http::response::json_ok;
use crate::http::server::AppState;

/// Slack for the server-side cancellation to arrive before the local
/// deadline gives up on it.
const CANCEL_GRACE: Duration = Duration::from_millis(250);

/// GET /api/users - list every user
///
/// The scan runs with a server-side statement timeout equal to the configured
/// deadline, so an abandoned query never keeps its connection. A local
/// deadline (plus grace) covers the wait for a connection. On any failure the
/// collected rows are dropped and a single 500 is returned.
async fn list_users(
    State(state): State<Arc<AppState>>,
    DbPool(pool): DbPool,
) -> Result<Response, ApiError> {
    let deadline = state.query_timeout;

    let repo = UserRepo::new(&pool).with_statement_timeout(deadline);
    let scan = repo.list();

    let users = tokio::time::timeout(deadline + CANCEL_GRACE, scan)
        .await
        .map_err(|_| ApiError::Timeout {
            resource: "users",
            millis: u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX),
        })?
        .map_err(|error| ApiError::Database {
            resource: "users",
            error,
        })?;

    tracing::debug!(count = users.len(), "serving user list");
    json_ok(&users)
}

/// User routes. Mount behind [`with_database`](crate::http::with_database).
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/users", get(list_users))
}
