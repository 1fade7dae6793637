//! Application configuration
//!
//! Loaded with confy under the `dpsmeter` app name; command-line flags
//! override whatever is stored here. A missing or unreadable file falls
//! back to the defaults.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log file to tail when none is given on the command line
    pub log_file: Option<String>,
    /// Look-back span for the damage-per-second window, in seconds
    pub window_secs: u64,
    /// Delay between file polls, in milliseconds
    pub poll_interval_ms: u64,
    /// Minimum delay between status-line redraws, in milliseconds
    pub refresh_interval_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_file: None,
            window_secs: 10,
            poll_interval_ms: 100,
            refresh_interval_ms: 1000,
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        confy::load("dpsmeter", "config").unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_knob() {
        let config = AppConfig::default();
        assert!(config.log_file.is_none());
        assert_eq!(config.window_secs, 10);
        assert_eq!(config.poll_interval_ms, 100);
        assert_eq!(config.refresh_interval_ms, 1000);
    }
}
