//! `/users` route group: user administration. The whole group is mounted
//! behind the admin guard.

use axum::{Router, routing::get};
use common::state::AppState;

pub mod get;

use get::{get_user, list_users};

pub fn users_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/{user_id}", get(get_user))
}
