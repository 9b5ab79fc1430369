//! Request authentication and per-endpoint authority checks.
//!
//! # Flow
//!
//! 1. [`auth::authorize`] runs for every request. A valid
//!    `Authorization: Bearer <token>` attaches a [`Principal`] to the request
//!    extensions; anything else leaves the request anonymous. It never
//!    rejects a request.
//! 2. Handlers opt into protection through extractors: [`auth::AuthUser`]
//!    requires a principal, and the `Require*` extractors generated by
//!    [`require_authority!`](crate::require_authority) additionally require
//!    one authority.
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::RequireUserDelete;
//!
//! async fn delete_user(RequireUserDelete(auth_user): RequireUserDelete) -> impl IntoResponse {
//!     // Only reached with a valid token carrying "user:delete"
//! }
//! ```
//!
//! [`Principal`]: supportportal_auth::Principal

pub mod auth;
