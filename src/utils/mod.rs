//! Shared utilities.
//!
//! - [`password`]: bcrypt hashing and random credential generation

pub mod password;
