//! Brute-force lockout configuration.
//!
//! # Environment Variables
//!
//! - `LOGIN_MAX_ATTEMPTS`: failures before an account is locked (default: 5)
//! - `LOGIN_ATTEMPT_TTL_SECONDS`: how long a failure record lives after its
//!   latest failure (default: 900)
//! - `LOGIN_MAX_TRACKED_USERS`: distinct usernames tracked at once (default: 10000)
//! - `LOGIN_PURGE_INTERVAL_SECONDS`: period of the background expiry sweep (default: 60)

use std::time::Duration;

use crate::env_or;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginAttemptConfig {
    pub max_attempts: u32,
    pub attempt_ttl: Duration,
    pub max_tracked_users: usize,
    pub purge_interval: Duration,
}

impl Default for LoginAttemptConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            attempt_ttl: Duration::from_secs(15 * 60),
            max_tracked_users: 10_000,
            purge_interval: Duration::from_secs(60),
        }
    }
}

impl LoginAttemptConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_attempts: env_or("LOGIN_MAX_ATTEMPTS", defaults.max_attempts),
            attempt_ttl: Duration::from_secs(env_or(
                "LOGIN_ATTEMPT_TTL_SECONDS",
                defaults.attempt_ttl.as_secs(),
            )),
            max_tracked_users: env_or("LOGIN_MAX_TRACKED_USERS", defaults.max_tracked_users),
            purge_interval: Duration::from_secs(env_or(
                "LOGIN_PURGE_INTERVAL_SECONDS",
                defaults.purge_interval.as_secs(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoginAttemptConfig::default();
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.attempt_ttl, Duration::from_secs(900));
        assert_eq!(config.max_tracked_users, 10_000);
        assert_eq!(config.purge_interval, Duration::from_secs(60));
    }

    #[test]
    fn test_config_clone() {
        let config = LoginAttemptConfig::default();
        let cloned = config.clone();
        assert_eq!(config, cloned);
    }
}
