//! # Support Portal API
//!
//! User-management backend built on Axum. The interesting part is
//! authentication: stateless signed bearer tokens, a per-request authorization
//! middleware, and a brute-force lockout tracker.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── supportportal-core/    # AppError, roles and the role → authority registry
//! ├── supportportal-config/  # environment-driven configuration
//! ├── supportportal-auth/    # Principal, TokenCodec, signer
//! └── supportportal-cache/   # LoginAttemptTracker
//! src/
//! ├── directory/             # UserDirectory trait + in-memory implementation
//! ├── middleware/            # authorize middleware and authority extractors
//! ├── modules/users/         # login, registration and user management endpoints
//! ├── notifier.rs            # Notifier trait + logging implementation
//! └── utils/                 # password hashing and generation
//! ```
//!
//! ## Request Flow
//!
//! 1. [`logging::logging_middleware`] tags the request with an id
//! 2. CORS answers cross-origin preflights
//! 3. [`middleware::auth::authorize`] turns a valid bearer token into a
//!    [`Principal`](supportportal_auth::Principal) on the request
//! 4. Handlers demand authorities through extractors such as
//!    [`middleware::auth::RequireUserDelete`]
//!
//! ## Login and Lockout
//!
//! `POST /user/login` returns the account in the body and the token in the
//! `Jwt-Token` header. Each failure is counted per username; once
//! `LOGIN_MAX_ATTEMPTS` failures accumulate within `LOGIN_ATTEMPT_TTL_SECONDS`
//! the next attempt locks the account.
//!
//! ## Modules
//!
//! - [`directory`]: account lookup and persistence
//! - [`logging`]: request logging and subscriber setup
//! - [`middleware`]: authentication and authorization
//! - [`modules`]: feature modules
//! - [`notifier`]: outbound notifications
//! - [`router`]: main application router
//! - [`state`]: shared application state
//! - [`utils`]: shared utilities
//! - [`validator`]: request validation

pub mod directory;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod notifier;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;

// Re-export workspace crates for convenience
pub use supportportal_auth;
pub use supportportal_cache;
pub use supportportal_config;
pub use supportportal_core;
