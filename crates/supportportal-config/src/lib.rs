//! # Support Portal Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: token signing, lifetime and header settings
//! - [`login_attempt`]: brute-force lockout tracker settings
//! - [`password`]: bcrypt cost and generated password length
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: bind address, log directory and bootstrap admin
//!
//! Every setting falls back to a default when its variable is unset or
//! cannot be parsed.
//!
//! # Example
//!
//! ```ignore
//! use supportportal_config::{CorsConfig, JwtConfig, LoginAttemptConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let login_attempt_config = LoginAttemptConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod login_attempt;
pub mod password;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use login_attempt::LoginAttemptConfig;
pub use password::PasswordConfig;
pub use server::ServerConfig;

pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
