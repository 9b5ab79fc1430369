//! # Support Portal Cache
//!
//! Process-local caches shared across requests.
//!
//! - [`login_attempts`]: [`LoginAttemptTracker`], the TTL- and capacity-bounded
//!   counter of recent failed logins that drives account lockout
//!
//! Nothing here is persisted; a restart forgets every recorded failure.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use supportportal_cache::LoginAttemptTracker;
//! use supportportal_config::LoginAttemptConfig;
//!
//! let tracker = Arc::new(LoginAttemptTracker::new(LoginAttemptConfig::from_env()));
//! let _purge = Arc::clone(&tracker).spawn_purge_task();
//!
//! tracker.record_failure("okot");
//! if tracker.exceeded_max("okot") {
//!     // lock the account
//! }
//! ```

pub mod login_attempts;

pub use login_attempts::LoginAttemptTracker;
