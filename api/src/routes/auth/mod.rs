//! `/auth` route group: registration, login, profile self-service and the
//! OTP-based forgot-password flow.

use crate::auth::guards::allow_authenticated;
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post, put},
};
use common::state::AppState;

pub mod get;
pub mod post;
pub mod put;

use get::me;
use post::{
    change_password, login, logout, password_reset_confirm, password_reset_request,
    password_reset_verify, register,
};
use put::update_profile;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/password-reset/request", post(password_reset_request))
        .route("/password-reset/verify", post(password_reset_verify))
        .route("/password-reset/confirm", post(password_reset_confirm))
        .route("/me", get(me).route_layer(from_fn(allow_authenticated)))
        .route(
            "/logout",
            post(logout).route_layer(from_fn(allow_authenticated)),
        )
        .route(
            "/change-password",
            post(change_password).route_layer(from_fn(allow_authenticated)),
        )
        .route(
            "/profile",
            put(update_profile).route_layer(from_fn(allow_authenticated)),
        )
}
