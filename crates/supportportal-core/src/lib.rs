//! # Support Portal Core
//!
//! Core types shared by every crate of the Support Portal API.
//!
//! - [`errors`]: HTTP-mapped application error and the error response body
//! - [`authorities`]: authority string constants (`user:read`, `user:delete`, ...)
//! - [`roles`]: the closed [`Role`] enumeration and the read-only
//!   [`RoleAuthorityRegistry`] that maps each role to its granted authorities
//!
//! # Example
//!
//! ```ignore
//! use supportportal_core::{RoleAuthorityRegistry, authorities};
//!
//! let granted = RoleAuthorityRegistry::global().authorities_for("admin")?;
//! assert!(granted.contains(&authorities::USER_CREATE));
//! ```

pub mod authorities;
pub mod errors;
pub mod roles;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorResponse};
pub use roles::{Role, RoleAuthorityRegistry, RoleError};
