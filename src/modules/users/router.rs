use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

use super::controller::{
    add_user, delete_user, find_user, list_users, login, register, reset_password, update_user,
};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/reset-password/{email}", get(reset_password))
        .route("/find/{username}", get(find_user))
        .route("/list", get(list_users))
        .route("/add", post(add_user))
        .route("/update", post(update_user))
        .route("/delete/{username}", delete(delete_user))
}
