//! Account entity, request DTOs and login outcomes.

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use supportportal_auth::Principal;
use supportportal_core::Role;

/// A user account as held by the [`UserDirectory`](crate::directory::UserDirectory).
///
/// `authorities` is a snapshot of the role's grants taken when the account was
/// created or last updated; tokens are minted from it, not from `role`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub authorities: Vec<String>,
    pub active: bool,
    pub non_locked: bool,
    pub join_date: DateTime<Utc>,
    pub last_login_date: Option<DateTime<Utc>>,
    pub last_login_date_display: Option<DateTime<Utc>>,
}

impl Account {
    pub fn principal(&self) -> Principal {
        Principal::new(self.username.clone(), self.authorities.iter().cloned())
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "first_name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last_name is required"))]
    pub last_name: String,
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
}

fn enabled() -> bool {
    true
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct AddUserRequest {
    #[validate(length(min = 1, message = "first_name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last_name is required"))]
    pub last_name: String,
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    /// Role name, e.g. `ROLE_ADMIN` or `admin`.
    #[validate(length(min = 1, message = "role is required"))]
    pub role: String,
    #[serde(default = "enabled")]
    pub active: bool,
    #[serde(default = "enabled")]
    pub non_locked: bool,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, message = "current_username is required"))]
    pub current_username: String,
    #[validate(length(min = 1, message = "first_name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last_name is required"))]
    pub last_name: String,
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "role is required"))]
    pub role: String,
    #[serde(default = "enabled")]
    pub active: bool,
    #[serde(default = "enabled")]
    pub non_locked: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Why a credential check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("Username / password incorrect. Please try again")]
    BadCredentials,

    #[error("Your account has been locked. Please contact administration")]
    AccountLocked,

    #[error("Your account has been disabled. If this is an error, please contact administration")]
    AccountDisabled,
}

impl LoginError {
    pub fn status(&self) -> StatusCode {
        match self {
            LoginError::AccountLocked => StatusCode::UNAUTHORIZED,
            LoginError::BadCredentials | LoginError::AccountDisabled => StatusCode::BAD_REQUEST,
        }
    }
}
