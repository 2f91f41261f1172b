//! Logging setup.
//!
//! Filter precedence: `FV_LOG`, then `RUST_LOG`, then the CLI verbosity.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "FV_LOG";

/// Install the global subscriber (stderr). Calling it twice is a no-op.
pub fn init(verbosity: u8) {
    let filter = env_filter().unwrap_or_else(|| EnvFilter::new(default_level(verbosity)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .ok();
}

/// Install a subscriber only when a filter is set in the environment.
///
/// The TUI owns the terminal, so it stays silent unless asked otherwise.
pub fn init_quiet() {
    if let Some(filter) = env_filter() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .with(filter)
            .try_init()
            .ok();
    }
}

fn env_filter() -> Option<EnvFilter> {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .ok()
}

fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(default_level(0), "warn");
        assert_eq!(default_level(1), "info");
        assert_eq!(default_level(5), "debug");
    }
}
