//! HTTP server layer
//!
//! Axum server with:
//! - Permissive CORS by default
//! - Request tracing
//! - Graceful shutdown
//! - Plain-text 500 responses for every internal failure

pub mod context;
pub mod error;
pub mod extractors;
pub mod response;
pub mod routes;
pub mod server;

pub use context::{attach_pool, pool_from_extensions, with_database, MissingConnectionError};
pub use error::ApiError;
pub use extractors::DbPool;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
