#![allow(dead_code)]

use std::sync::{Arc, LazyLock, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use supportportal::directory::InMemoryUserDirectory;
use supportportal::modules::users::model::Account;
use supportportal::notifier::{Notifier, NotifyError};
use supportportal::router::init_router;
use supportportal::state::AppState;
use supportportal::utils::password::hash_password;
use supportportal_config::{CorsConfig, JwtConfig, LoginAttemptConfig, PasswordConfig};
use supportportal_core::{Role, RoleAuthorityRegistry};

pub const TEST_SECRET: &str = "integration-test-secret-key-0123456789";
pub const PASSWORD: &str = "correct-horse-battery";
pub const TOKEN_HEADER: &str = "jwt-token";

static PASSWORD_HASH: LazyLock<String> =
    LazyLock::new(|| hash_password(PASSWORD, 4).unwrap());

#[derive(Debug, Clone)]
pub struct SentPassword {
    pub first_name: String,
    pub password: String,
    pub email: String,
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<SentPassword>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<SentPassword> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_password_for(&self, email: &str) -> Option<String> {
        self.sent()
            .into_iter()
            .rev()
            .find(|message| message.email == email)
            .map(|message| message.password)
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_generated_password(
        &self,
        first_name: &str,
        password: &str,
        email: &str,
    ) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(SentPassword {
            first_name: first_name.to_string(),
            password: password.to_string(),
            email: email.to_string(),
        });
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub notifier: Arc<RecordingNotifier>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn token(&self) -> String {
        self.headers
            .get(TOKEN_HEADER)
            .expect("missing token header")
            .to_str()
            .unwrap()
            .to_string()
    }

    pub fn error(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}

/// An account with password [`PASSWORD`], active and unlocked.
pub fn account(username: &str, role: Role) -> Account {
    Account {
        user_id: format!("{:0>10}", username.len()),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: PASSWORD_HASH.clone(),
        role,
        authorities: RoleAuthorityRegistry::global().snapshot(role),
        active: true,
        non_locked: true,
        join_date: Utc::now(),
        last_login_date: None,
        last_login_date_display: None,
    }
}

pub fn spawn_app(accounts: Vec<Account>) -> TestApp {
    // user_id must be unique per account.
    let accounts = accounts.into_iter().enumerate().map(|(index, mut account)| {
        account.user_id = format!("{:0>10}", index + 1);
        account
    });

    let notifier = Arc::new(RecordingNotifier::default());
    let state = AppState::new(
        JwtConfig::with_secret(TEST_SECRET),
        LoginAttemptConfig::default(),
        CorsConfig::default(),
        PasswordConfig {
            bcrypt_cost: 4,
            generated_length: 10,
        },
        Arc::new(InMemoryUserDirectory::with_accounts(accounts)),
        notifier.clone(),
    )
    .unwrap();

    TestApp {
        router: init_router(state.clone()),
        state,
        notifier,
    }
}

/// Seeded accounts, one per role: `user`, `hr`, `manager`, `admin`, `super`.
pub fn spawn_seeded_app() -> TestApp {
    spawn_app(vec![
        account("user", Role::User),
        account("hr", Role::Hr),
        account("manager", Role::Manager),
        account("admin", Role::Admin),
        account("super", Role::SuperAdmin),
    ])
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        self.send(json_request(
            Method::POST,
            "/user/login",
            None,
            serde_json::json!({ "username": username, "password": password }),
        ))
        .await
    }

    /// Logs in with [`PASSWORD`] and returns the issued token.
    pub async fn token_for(&self, username: &str) -> String {
        let response = self.login(username, PASSWORD).await;
        assert_eq!(response.status, StatusCode::OK, "login failed for {username}");
        response.token()
    }
}

pub fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}
