//! rqms-server: HTTP server for the simplerqms user directory
//!
//! Serves `GET /api/users` from a shared Postgres pool. The pool reaches
//! handlers through request extensions, attached by the database
//! middleware in [`http::context`].

pub mod db;
pub mod http;

pub use db::{ConnectError, ConnectionProvider, PgConnectionProvider, PoolOptions};
pub use http::{build_router, run_server, ApiError, ServerConfig};
