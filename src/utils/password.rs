use anyhow::Context;
use bcrypt::{hash, verify};
use rand::Rng;
use rand::distributions::{Alphanumeric, Uniform};

use supportportal_core::AppError;

pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost)
        .context("Failed to hash password")
        .map_err(AppError::internal)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .context("Failed to verify password")
        .map_err(AppError::internal)
}

/// Random alphanumeric password handed to the user by the notifier.
pub fn generate_password(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Ten random decimal digits.
pub fn generate_user_id() -> String {
    rand::thread_rng()
        .sample_iter(Uniform::new_inclusive(b'0', b'9'))
        .take(10)
        .map(char::from)
        .collect()
}
