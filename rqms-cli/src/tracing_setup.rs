//! Log output for the simplerqms binary
//!
//! Everything goes to stderr so stdout stays clean for whatever wraps the
//! process. `RUST_LOG` wins over `--debug`:
//!
//!   simplerqms --debug
//!   RUST_LOG=rqms_server=debug,tower_http=debug simplerqms

use std::io::IsTerminal;

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Log output options
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingConfig {
    /// Debug level and event targets when RUST_LOG is unset
    pub debug: bool,
}

impl TracingConfig {
    fn fallback_directive(self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }

    /// Filter from an explicit `RUST_LOG` value, falling back to the
    /// configured level when it is absent or does not parse.
    fn filter(self, rust_log: Option<&str>) -> EnvFilter {
        rust_log
            .and_then(|directives| EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| EnvFilter::new(self.fallback_directive()))
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(config: TracingConfig) -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_env_filter(config.filter(rust_log.as_deref()))
        .with_target(config.debug)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
