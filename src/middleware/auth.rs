use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, Method, StatusCode, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use supportportal_auth::{Principal, TokenCodec};
use supportportal_core::AppError;

use crate::state::AppState;

pub const NOT_AUTHENTICATED: &str = "You need to log in to access this page";
pub const ACCESS_DENIED: &str = "You do not have enough permission";

/// Resolves the bearer token, if any, into a request-scoped [`Principal`].
///
/// Preflight `OPTIONS` requests are answered with `200 OK` right here. Every
/// other request continues downstream whether or not a principal was found.
pub async fn authorize(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    // Only this middleware may put a principal on the request.
    req.extensions_mut().remove::<Principal>();

    if let Some(principal) = resolve_principal(
        &state.token_codec,
        &state.jwt_config.token_prefix,
        req.headers(),
    ) {
        req.extensions_mut().insert(principal);
    }

    next.run(req).await
}

fn resolve_principal(codec: &TokenCodec, prefix: &str, headers: &HeaderMap) -> Option<Principal> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix(prefix)?;

    let username = match codec.get_subject(token) {
        Ok(username) => username,
        Err(err) => {
            debug!(error.kind = err.kind(), "Rejected bearer token");
            return None;
        }
    };

    match codec.is_valid(&username, token) {
        Ok(true) => {}
        Ok(false) => {
            debug!(username = %username, "Bearer token is no longer valid");
            return None;
        }
        Err(err) => {
            debug!(error.kind = err.kind(), "Rejected bearer token");
            return None;
        }
    }

    let authorities = codec.get_authorities(token).ok()?;
    Some(Principal::new(username, authorities))
}

/// Extractor for the authenticated principal. Rejects anonymous requests with 403.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl AuthUser {
    pub fn username(&self) -> &str {
        self.0.username()
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.0.has_authority(authority)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AppError::forbidden(NOT_AUTHENTICATED))
    }
}

/// Generates an extractor that requires one authority on top of [`AuthUser`].
#[macro_export]
macro_rules! require_authority {
    ($name:ident, $authority:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl<S: Send + Sync> axum::extract::FromRequestParts<S> for $name {
            type Rejection = supportportal_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &S,
            ) -> Result<Self, Self::Rejection> {
                let auth_user = <$crate::middleware::auth::AuthUser as axum::extract::FromRequestParts<S>>::from_request_parts(
                    parts, state,
                )
                .await?;

                if !auth_user.has_authority($authority) {
                    return Err(supportportal_core::AppError::forbidden(
                        $crate::middleware::auth::ACCESS_DENIED,
                    ));
                }

                Ok($name(auth_user))
            }
        }
    };
}

require_authority!(RequireUserRead, supportportal_core::authorities::USER_READ);
require_authority!(RequireUserCreate, supportportal_core::authorities::USER_CREATE);
require_authority!(RequireUserUpdate, supportportal_core::authorities::USER_UPDATE);
require_authority!(RequireUserDelete, supportportal_core::authorities::USER_DELETE);
