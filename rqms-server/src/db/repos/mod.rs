//! Repository implementations
//!
//! Each repo borrows the shared pool and owns its cursors for the duration
//! of a call.

mod users;

pub use users::{User, UserRepo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The query failed or the cursor errored while streaming rows.
    #[error("database error: {0}")]
    Query(#[from] sqlx::Error),

    /// The server cancelled the scan at its statement timeout.
    #[error("statement timed out: {0}")]
    StatementTimeout(#[source] sqlx::Error),

    /// A row was read but a column did not decode into the model.
    #[error("failed to decode column '{column}': {source}")]
    Decode {
        column: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

/// SQLSTATE `query_canceled`, raised when `statement_timeout` fires.
const QUERY_CANCELED: &str = "57014";

impl DbError {
    /// Classify a query-side failure, separating server-side cancellation.
    pub(crate) fn from_query(e: sqlx::Error) -> Self {
        let canceled = matches!(
            &e,
            sqlx::Error::Database(db) if db.code().as_deref() == Some(QUERY_CANCELED)
        );

        if canceled {
            Self::StatementTimeout(e)
        } else {
            Self::Query(e)
        }
    }
}
