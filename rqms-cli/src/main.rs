//! simplerqms - user directory HTTP service
//!
//! Serves `GET /api/users` from the Postgres database named by
//! `DATABASE_URL`. A `.env` file in the working directory (or a parent) is
//! loaded before arguments are parsed.

use std::process::ExitCode;

use clap::Parser;

mod serve;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "simplerqms",
    author,
    version,
    about = "User directory HTTP service backed by Postgres"
)]
struct Cli {
    /// Debug logging (unless RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(flatten)]
    serve: serve::ServeArgs,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(err) = tracing_setup::init(TracingConfig { debug: cli.debug }) {
        eprintln!("failed to initialize tracing: {err:#}");
    }

    match serve::run_serve(cli.serve).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
