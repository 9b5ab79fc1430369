use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::{info, warn};

use supportportal::logging::init_tracing;
use supportportal::modules::users::service::UserService;
use supportportal::router::init_router;
use supportportal::state::init_app_state;
use supportportal_config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let server_config = ServerConfig::from_env();
    init_tracing(&server_config.log_dir)?;

    let state = init_app_state()?;
    let _purge = Arc::clone(&state.login_attempts).spawn_purge_task();

    match (
        &server_config.bootstrap_admin_username,
        &server_config.bootstrap_admin_email,
    ) {
        (Some(username), Some(email)) => {
            UserService::bootstrap_super_admin(&state, username, email)
                .await
                .map_err(|err| anyhow::anyhow!("Failed to create super admin: {}", err.error))?;
        }
        (None, None) => {}
        _ => warn!("BOOTSTRAP_ADMIN_USERNAME and BOOTSTRAP_ADMIN_EMAIL must be set together"),
    }

    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(&server_config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", server_config.addr))?;
    info!(addr = %server_config.addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
