use anyhow::anyhow;
use axum::http::{HeaderName, HeaderValue, Method, header};
use axum::{Router, middleware};
use supportportal_core::AppError;
use tower_http::cors::CorsLayer;

use crate::logging::logging_middleware;
use crate::middleware::auth::authorize;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    let cors = cors_layer(&state);

    Router::new()
        .nest("/user", init_users_router())
        .fallback(no_mapping)
        .layer(middleware::from_fn_with_state(state.clone(), authorize))
        .with_state(state)
        .layer(cors)
        .layer(middleware::from_fn(logging_middleware))
}

async fn no_mapping() -> AppError {
    AppError::not_found(anyhow!("There is no mapping for this url"))
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let mut exposed = vec![header::AUTHORIZATION];
    if let Ok(token_header) = HeaderName::try_from(state.jwt_config.token_header.as_str()) {
        exposed.push(token_header);
    }

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
        ])
        .expose_headers(exposed)
        .allow_credentials(true)
}
