//! Logging setup for the `patrons` binary.
//!
//! Events go to stderr so stdout carries nothing but the JSON response.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Builds the filter: `RUST_LOG` when not verbose (falling back to `warn`),
/// otherwise `debug` for `-v` and `trace` for `-vv`.
fn build_env_filter(verbosity: u8) -> anyhow::Result<EnvFilter> {
    let level = match verbosity {
        0 => match EnvFilter::try_from_default_env() {
            Ok(filter) => return Ok(filter),
            Err(_) => "warn",
        },
        1 => "debug",
        _ => "trace",
    };

    EnvFilter::try_new(level)
        .map_err(|e| anyhow::anyhow!("Invalid tracing filter '{}': {}", level, e))
}

/// Installs the global subscriber.
pub fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(verbosity)?)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {}", e))?;

    tracing::trace!(verbosity, "Logging initialized");
    Ok(())
}
