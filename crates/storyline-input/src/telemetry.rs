//! Tracing setup for hosts embedding the style panels.
//!
//! Library code only emits `tracing` events under `storyline::*` targets.
//! Hosts without their own subscriber can install a console one here.
//!
//! # Usage
//!
//! ```ignore
//! use storyline_input::telemetry::{self, TelemetryConfig};
//!
//! telemetry::init(TelemetryConfig::from_env());
//! tracing::info!("panel ready");
//! ```

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Console log level (default: INFO, DEBUG in debug builds)
    pub console_level: Level,
}

impl TelemetryConfig {
    /// Level from the build profile. `RUST_LOG` still overrides it at init.
    pub fn from_env() -> Self {
        let console_level = if cfg!(debug_assertions) {
            Level::DEBUG
        } else {
            Level::INFO
        };
        Self { console_level }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Install a compact console subscriber.
///
/// Returns false if a global subscriber was already set.
pub fn init(config: TelemetryConfig) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.console_level.as_str().to_lowercase()));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(console_layer)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_installs_once() {
        // The first call may race other tests for the global slot; the
        // repeat call always finds it taken.
        let _ = init(TelemetryConfig::default());
        assert!(!init(TelemetryConfig {
            console_level: Level::WARN,
        }));
        tracing::debug!(target: "storyline::input", "still logging after a second init");
    }

    #[test]
    fn test_level_follows_build_profile() {
        let expected = if cfg!(debug_assertions) {
            Level::DEBUG
        } else {
            Level::INFO
        };
        assert_eq!(TelemetryConfig::from_env().console_level, expected);
    }
}
