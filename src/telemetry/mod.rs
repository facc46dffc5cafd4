//! Logging setup for lawnbook
//!
//! Structured `tracing` events go to stderr so command output on stdout
//! stays clean. `RUST_LOG` takes precedence over the requested level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::errors::{LawnError, Result};

/// Filter used when `RUST_LOG` is unset
pub fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the global subscriber
pub fn init(level: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(filter_for(level))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(true),
        )
        .try_init()
        .map_err(|e| LawnError::Generic(format!("Failed to initialize logging: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        let _ = init("warn");
        assert!(init("debug").is_err());
    }
}
