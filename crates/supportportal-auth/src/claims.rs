//! Token header and payload structures.
//!
//! - [`TokenHeader`]: algorithm and type, the first segment
//! - [`Claims`]: identity and lifetime claims, the second segment

use serde::{Deserialize, Serialize};

/// The first token segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    /// Token type, always `JWT` for issued tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
    /// Signing algorithm, e.g. `HS512`
    pub alg: String,
}

impl TokenHeader {
    pub fn new(alg: &str) -> Self {
        Self {
            typ: Some("JWT".to_string()),
            alg: alg.to_string(),
        }
    }
}

/// The second token segment.
///
/// # Fields
///
/// - `iss`: issuing application
/// - `aud`: intended audience
/// - `sub`: username of the authenticated account
/// - `authorities`: authorities granted at issuance, serialized as `Authorities`
/// - `iat`: issued-at, seconds since the epoch
/// - `exp`: expiry, seconds since the epoch; always `iat + TTL`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
    /// Username (subject claim)
    pub sub: String,
    /// Authority names granted to the user
    #[serde(rename = "Authorities", default)]
    pub authorities: Vec<String>,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: i64,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Whether the token is past its expiry at `now` (seconds since the epoch).
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }
}
