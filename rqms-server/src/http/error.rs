//! API error type with IntoResponse
//!
//! Every variant is a 500 with a fixed human-readable text body. The
//! underlying error goes to the log, never to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::context::MissingConnectionError;
use crate::db::{ConnectError, DbError};

/// API error type
#[derive(Debug)]
pub enum ApiError {
    /// Provider could not hand out a pool
    Connect(ConnectError),

    /// Handler ran without the database middleware in front of it
    MissingConnection(MissingConnectionError),

    /// Query, cursor or row decoding failed
    Database {
        resource: &'static str,
        error: DbError,
    },

    /// Database work exceeded the per-request deadline
    Timeout { resource: &'static str, millis: u64 },

    /// Response body could not be serialized
    Encode(serde_json::Error),
}

impl ApiError {
    /// Text sent to the client.
    pub fn message(&self) -> String {
        match self {
            Self::Connect(_) | Self::MissingConnection(_) => {
                "Could not establish a connection to the database".to_owned()
            }
            Self::Database {
                resource,
                error: DbError::Query(_),
            } => format!("Could not retrieve list of {} from the db", resource),
            Self::Database {
                resource,
                error: DbError::Decode { .. },
            } => format!("Error parsing the {}", resource),
            Self::Database {
                resource,
                error: DbError::StatementTimeout(_),
            }
            | Self::Timeout { resource, .. } => {
                format!("Timed out retrieving the list of {}", resource)
            }
            Self::Encode(_) => "Could not encode the response".to_owned(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Connect(e) => tracing::error!(error = %e, "database connection unavailable"),
            Self::MissingConnection(e) => {
                tracing::error!(error = %e, "handler mounted without database middleware")
            }
            Self::Database { resource, error } => {
                tracing::error!(resource, error = %error, "database error")
            }
            Self::Timeout { resource, millis } => {
                tracing::error!(resource, millis, "database call timed out")
            }
            Self::Encode(e) => tracing::error!(error = %e, "failed to serialize response"),
        }

        (StatusCode::INTERNAL_SERVER_ERROR, self.message()).into_response()
    }
}

impl From<ConnectError> for ApiError {
    fn from(e: ConnectError) -> Self {
        Self::Connect(e)
    }
}

impl From<MissingConnectionError> for ApiError {
    fn from(e: MissingConnectionError) -> Self {
        Self::MissingConnection(e)
    }
}
