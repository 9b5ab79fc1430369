//! JSON request bodies checked with `validator` before a handler runs.
//!
//! Every body problem is a `400 Bad Request`: unreadable JSON carries axum's
//! rejection text, failed rules carry their messages ordered by field name.
//! Request DTOs default missing fields, so an absent field and an empty one
//! fail the same rule with the same message.

use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use supportportal_core::AppError;

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(unreadable_body)?;

        value
            .validate()
            .map_err(|errors| AppError::bad_request(anyhow!(rule_messages(&errors))))?;

        Ok(ValidatedJson(value))
    }
}

fn unreadable_body(rejection: JsonRejection) -> AppError {
    let message = match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "Request body must be sent as application/json".to_string()
        }
        other => other.body_text(),
    };
    AppError::bad_request(anyhow!(message))
}

fn rule_messages(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, failures)| {
            failures.iter().map(move |failure| match &failure.message {
                Some(message) => message.to_string(),
                None => format!("{field} failed rule `{}`", failure.code),
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}
