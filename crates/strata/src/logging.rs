//! Logging setup for applications built on Strata.
//!
//! The library crates only emit `tracing` events: allocation failures and
//! rollbacks at `trace`, arena lifecycle and first-time interning at
//! `debug`, table initialisation at `info`. This module installs a
//! subscriber that shows them.

pub use tracing::{debug, error, info, trace, warn, Level};

/// Install a compact `tracing` subscriber.
///
/// The filter comes from `RUST_LOG` when set, otherwise `strata=debug` in
/// debug builds and `strata=info` in release builds. Calling this again,
/// or after another subscriber was installed, does nothing.
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        #[cfg(debug_assertions)]
        {
            EnvFilter::new("strata=debug")
        }
        #[cfg(not(debug_assertions))]
        {
            EnvFilter::new("strata=info")
        }
    });

    fmt().with_env_filter(filter).compact().try_init().ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init_logging();
        init_logging();
        info!(target: "strata::test", "logging initialised twice");
    }
}
