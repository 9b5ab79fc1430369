use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
};
use tracing::instrument;

use supportportal_core::AppError;

use crate::middleware::auth::{RequireUserCreate, RequireUserDelete, RequireUserRead, RequireUserUpdate};
use crate::modules::users::model::{
    Account, AddUserRequest, LoginRequest, MessageResponse, RegisterRequest, UpdateUserRequest,
};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Authenticates and returns the account; the token travels in the
/// configured response header, never in the body.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(HeaderMap, Json<Account>), AppError> {
    let (account, token) = UserService::login(&state, dto).await?;

    let name = HeaderName::try_from(state.jwt_config.token_header.as_str())
        .map_err(AppError::internal)?;
    let value = HeaderValue::try_from(token).map_err(AppError::internal)?;

    let mut headers = HeaderMap::new();
    headers.insert(name, value);

    Ok((headers, Json(account)))
}

#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<Account>), AppError> {
    let account = UserService::register(&state, dto).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

#[instrument(skip(state))]
pub async fn reset_password(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    UserService::reset_password(&state, &email).await?;
    Ok(Json(MessageResponse {
        message: format!("An email with a new password was sent to: {email}"),
    }))
}

#[instrument(skip(state, _auth_user))]
pub async fn find_user(
    State(state): State<AppState>,
    RequireUserRead(_auth_user): RequireUserRead,
    Path(username): Path<String>,
) -> Result<Json<Account>, AppError> {
    let account = UserService::find_user(&state, &username).await?;
    Ok(Json(account))
}

#[instrument(skip_all)]
pub async fn list_users(
    State(state): State<AppState>,
    RequireUserRead(_auth_user): RequireUserRead,
) -> Result<Json<Vec<Account>>, AppError> {
    let accounts = UserService::list_users(&state).await?;
    Ok(Json(accounts))
}

#[instrument(skip_all, fields(by = %auth_user.username()))]
pub async fn add_user(
    State(state): State<AppState>,
    RequireUserCreate(auth_user): RequireUserCreate,
    ValidatedJson(dto): ValidatedJson<AddUserRequest>,
) -> Result<(StatusCode, Json<Account>), AppError> {
    let account = UserService::add_user(&state, dto).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

#[instrument(skip_all, fields(by = %auth_user.username()))]
pub async fn update_user(
    State(state): State<AppState>,
    RequireUserUpdate(auth_user): RequireUserUpdate,
    ValidatedJson(dto): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<Account>, AppError> {
    let account = UserService::update_user(&state, dto).await?;
    Ok(Json(account))
}

#[instrument(skip(state, auth_user), fields(by = %auth_user.username()))]
pub async fn delete_user(
    State(state): State<AppState>,
    RequireUserDelete(auth_user): RequireUserDelete,
    Path(username): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    UserService::delete_user(&state, &username).await?;
    Ok(Json(MessageResponse {
        message: "User deleted successfully".to_string(),
    }))
}
