use std::fmt;
use std::sync::Arc;

use supportportal_auth::TokenCodec;
use supportportal_cache::LoginAttemptTracker;
use supportportal_config::{CorsConfig, JwtConfig, LoginAttemptConfig, PasswordConfig};

use crate::directory::{InMemoryUserDirectory, UserDirectory};
use crate::notifier::{LogNotifier, Notifier};

#[derive(Clone)]
pub struct AppState {
    pub token_codec: Arc<TokenCodec>,
    pub login_attempts: Arc<LoginAttemptTracker>,
    pub directory: Arc<dyn UserDirectory>,
    pub notifier: Arc<dyn Notifier>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub password_config: PasswordConfig,
}

impl AppState {
    pub fn new(
        jwt_config: JwtConfig,
        login_attempt_config: LoginAttemptConfig,
        cors_config: CorsConfig,
        password_config: PasswordConfig,
        directory: Arc<dyn UserDirectory>,
        notifier: Arc<dyn Notifier>,
    ) -> anyhow::Result<Self> {
        let token_codec = TokenCodec::from_config(&jwt_config)?;

        Ok(Self {
            token_codec: Arc::new(token_codec),
            login_attempts: Arc::new(LoginAttemptTracker::new(login_attempt_config)),
            directory,
            notifier,
            jwt_config,
            cors_config,
            password_config,
        })
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("jwt_config", &self.jwt_config)
            .field("cors_config", &self.cors_config)
            .field("password_config", &self.password_config)
            .field("tracked_logins", &self.login_attempts.len())
            .finish_non_exhaustive()
    }
}

pub fn init_app_state() -> anyhow::Result<AppState> {
    AppState::new(
        JwtConfig::from_env(),
        LoginAttemptConfig::from_env(),
        CorsConfig::from_env(),
        PasswordConfig::from_env(),
        Arc::new(InMemoryUserDirectory::new()),
        Arc::new(LogNotifier),
    )
}
