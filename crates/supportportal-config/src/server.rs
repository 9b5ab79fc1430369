use std::env;

/// Process-level settings for the HTTP server.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Socket address the listener binds to.
    pub addr: String,
    /// Directory for the rolling JSON log files.
    pub log_dir: String,
    /// Username of a super admin created at startup if it does not exist yet.
    pub bootstrap_admin_username: Option<String>,
    pub bootstrap_admin_email: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8081".to_string()),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "storage/logs".to_string()),
            bootstrap_admin_username: non_empty_var("BOOTSTRAP_ADMIN_USERNAME"),
            bootstrap_admin_email: non_empty_var("BOOTSTRAP_ADMIN_EMAIL"),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
