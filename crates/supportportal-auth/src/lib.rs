//! # Support Portal Auth
//!
//! Stateless bearer-token handling for the Support Portal API.
//!
//! - [`principal`]: the authenticated identity ([`Principal`]) carried through a request
//! - [`claims`]: token header and payload structures
//! - [`signer`]: the [`Signer`] seam and its HMAC-SHA-512 implementation
//! - [`codec`]: [`TokenCodec`], which issues, decodes and verifies tokens
//! - [`error`]: [`TokenError`], one variant per distinguishable failure
//!
//! # Wire Format
//!
//! ```text
//! base64url(header) "." base64url(payload) "." base64url(signature)
//! ```
//!
//! The header names the algorithm (`HS512`) and type (`JWT`). The payload
//! carries `iss`, `aud`, `sub`, `Authorities`, `iat` and `exp`. Tokens are
//! immutable once issued and there is no revocation list: a role change or a
//! leaked token stays effective until `exp`.
//!
//! # Example
//!
//! ```ignore
//! use supportportal_auth::{Principal, TokenCodec};
//! use supportportal_config::JwtConfig;
//!
//! let codec = TokenCodec::from_config(&JwtConfig::from_env())?;
//! let token = codec.issue(&Principal::new("jdoe", ["user:read"]))?;
//!
//! assert!(codec.is_valid("jdoe", &token)?);
//! assert_eq!(codec.get_subject(&token)?, "jdoe");
//! ```

pub mod claims;
pub mod codec;
pub mod error;
pub mod principal;
pub mod signer;

// Re-export commonly used types at crate root
pub use claims::{Claims, TokenHeader};
pub use codec::TokenCodec;
pub use error::TokenError;
pub use principal::Principal;
pub use signer::{HmacSha512Signer, Signer};
