//! Password hashing and generation settings.
//!
//! # Environment Variables
//!
//! - `BCRYPT_COST`: bcrypt work factor (default: 12)
//! - `GENERATED_PASSWORD_LENGTH`: length of passwords issued on registration
//!   and reset (default: 10)

use crate::env_or;

pub const DEFAULT_BCRYPT_COST: u32 = 12;
pub const DEFAULT_GENERATED_PASSWORD_LENGTH: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasswordConfig {
    pub bcrypt_cost: u32,
    pub generated_length: usize,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            generated_length: DEFAULT_GENERATED_PASSWORD_LENGTH,
        }
    }
}

impl PasswordConfig {
    pub fn from_env() -> Self {
        Self {
            bcrypt_cost: env_or("BCRYPT_COST", DEFAULT_BCRYPT_COST),
            generated_length: env_or(
                "GENERATED_PASSWORD_LENGTH",
                DEFAULT_GENERATED_PASSWORD_LENGTH,
            ),
        }
    }
}
