//! Session management configuration.

use serde::{Deserialize, Serialize};

/// Session management configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Absolute session lifetime in hours, counted from login.
    #[serde(default = "default_ttl")]
    pub ttl_hours: u64,
    /// Interval for the expired-session sweep in minutes (`0` disables it;
    /// expired sessions are still evicted lazily on lookup).
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_minutes: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_hours: default_ttl(),
            cleanup_interval_minutes: default_cleanup_interval(),
        }
    }
}

fn default_ttl() -> u64 {
    24
}

fn default_cleanup_interval() -> u64 {
    15
}
