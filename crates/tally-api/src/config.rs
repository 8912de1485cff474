//! Environment-driven server configuration.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use tally_core::RateLimitConfig;

/// Runtime settings, read from `TALLY_*` environment variables with
/// defaults suitable for local use.
#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub data_dir: PathBuf,
    pub rate_limit: RateLimitConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            data_dir: PathBuf::from("data"),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the environment, falling back to defaults
    /// for unset or unparsable values.
    pub fn from_env() -> Self {
        let defaults = Config::default();

        let addr = env::var("TALLY_ADDR")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.addr);

        let data_dir = env::var("TALLY_DATA_DIR")
            .ok()
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let max_requests = env::var("TALLY_RATE_LIMIT_MAX")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.rate_limit.max_requests);

        let window_secs = env::var("TALLY_RATE_LIMIT_WINDOW_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.rate_limit.window_secs);

        Self {
            addr,
            data_dir,
            rate_limit: RateLimitConfig {
                max_requests,
                window_secs,
            },
        }
    }
}
