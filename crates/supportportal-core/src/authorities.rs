//! Authority constants for the Support Portal API.
//!
//! An authority is a single granted permission carried in a token's
//! `Authorities` claim. Per-endpoint guards compare against these constants
//! rather than string literals.
//!
//! # Example
//!
//! ```ignore
//! use supportportal_core::authorities;
//!
//! if principal.has_authority(authorities::USER_DELETE) {
//!     // Delete user
//! }
//! ```

/// Permission to read user accounts
pub const USER_READ: &str = "user:read";
/// Permission to update user accounts
pub const USER_UPDATE: &str = "user:update";
/// Permission to create user accounts
pub const USER_CREATE: &str = "user:create";
/// Permission to delete user accounts
pub const USER_DELETE: &str = "user:delete";

pub const USER_AUTHORITIES: &[&str] = &[USER_READ];
pub const HR_AUTHORITIES: &[&str] = &[USER_READ, USER_UPDATE];
pub const MANAGER_AUTHORITIES: &[&str] = &[USER_READ, USER_UPDATE];
pub const ADMIN_AUTHORITIES: &[&str] = &[USER_READ, USER_CREATE, USER_UPDATE];
pub const SUPER_ADMIN_AUTHORITIES: &[&str] = &[USER_READ, USER_CREATE, USER_UPDATE, USER_DELETE];
