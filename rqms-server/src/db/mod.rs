//! Database layer - connection provider and repositories
//!
//! # Design Principles
//!
//! - One pool per process, built by the binary and shared by clone
//! - Handlers never see the provider, only the pool attached to their request
//! - Cursors are streamed and dropped on every exit path

pub mod pool;
pub mod repos;

pub use pool::{ConnectError, ConnectionProvider, PgConnectionProvider, PoolOptions};
pub use repos::*;
