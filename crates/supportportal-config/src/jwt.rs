//! Token signing configuration.
//!
//! # Environment Variables
//!
//! - `JWT_SECRET`: HMAC signing key (default: development placeholder)
//! - `JWT_ACCESS_EXPIRY`: token lifetime in seconds (default: 432000, five days)
//! - `JWT_ISSUER`: `iss` claim (default: `Support App, LLC`)
//! - `JWT_AUDIENCE`: `aud` claim (default: `User Management Portal`)
//! - `JWT_TOKEN_HEADER`: response header carrying an issued token (default: `Jwt-Token`)
//! - `JWT_TOKEN_PREFIX`: scheme prefix of the `Authorization` header (default: `Bearer `)

use std::env;
use std::fmt;

use crate::env_or;

pub const DEFAULT_ISSUER: &str = "Support App, LLC";
pub const DEFAULT_AUDIENCE: &str = "User Management Portal";
pub const DEFAULT_TOKEN_HEADER: &str = "Jwt-Token";
pub const DEFAULT_TOKEN_PREFIX: &str = "Bearer ";
/// Five days.
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 432_000;

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64,
    pub issuer: String,
    pub audience: String,
    pub token_header: String,
    pub token_prefix: String,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            access_token_expiry: env_or("JWT_ACCESS_EXPIRY", DEFAULT_ACCESS_TOKEN_EXPIRY),
            issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| DEFAULT_ISSUER.to_string()),
            audience: env::var("JWT_AUDIENCE").unwrap_or_else(|_| DEFAULT_AUDIENCE.to_string()),
            token_header: env::var("JWT_TOKEN_HEADER")
                .unwrap_or_else(|_| DEFAULT_TOKEN_HEADER.to_string()),
            token_prefix: env::var("JWT_TOKEN_PREFIX")
                .unwrap_or_else(|_| DEFAULT_TOKEN_PREFIX.to_string()),
        }
    }

    /// Config with the given secret and defaults for everything else.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_token_expiry: DEFAULT_ACCESS_TOKEN_EXPIRY,
            issuer: DEFAULT_ISSUER.to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
            token_header: DEFAULT_TOKEN_HEADER.to_string(),
            token_prefix: DEFAULT_TOKEN_PREFIX.to_string(),
        }
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("token_header", &self.token_header)
            .field("token_prefix", &self.token_prefix)
            .finish()
    }
}
