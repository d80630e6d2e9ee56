//! HTTP server command
//!
//! Connects the pool first; nothing is bound unless the database answers.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use rqms_server::{run_server, PgConnectionProvider, PoolOptions, ServerConfig};

/// Arguments for serving the API
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "RQMS_BIND", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Database URL
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Restrict CORS to localhost origins (default: any origin)
    #[arg(long)]
    pub cors_localhost: bool,

    /// Maximum pooled database connections
    #[arg(long, default_value_t = 5)]
    pub max_connections: u32,

    /// Seconds to wait for a database connection
    #[arg(long, default_value_t = 5)]
    pub connect_timeout: u64,

    /// Seconds allowed for one request's database work
    #[arg(long, default_value_t = 30)]
    pub query_timeout: u64,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let database_url = args
        .database_url
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;

    let pool_options = PoolOptions {
        max_connections: args.max_connections,
        connect_timeout: Duration::from_secs(args.connect_timeout),
    };

    let provider = PgConnectionProvider::connect(&database_url, pool_options)
        .await
        .context("Failed to create database pool")?;
    tracing::info!("Database pool ready");

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: !args.cors_localhost,
        query_timeout: Duration::from_secs(args.query_timeout),
    };

    tracing::info!("Starting simplerqms server on {}", config.bind_addr);

    // Run server (blocks until shutdown)
    let served = run_server(Arc::new(provider.clone()), config).await;
    provider.close().await;

    served.context("Server error")
}
