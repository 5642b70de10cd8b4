//! `/interview-questions` route group.
//!
//! Reads are public but non-admins only see active questions; mutations are
//! admin-only.

use crate::auth::guards::allow_admin;
use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get, post, put},
};
use common::state::AppState;

pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use delete::delete_interview_question;
use get::{get_interview_question, list_interview_questions};
use post::create_interview_question;
use put::{edit_interview_question, toggle_interview_question};

pub fn interview_questions_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_interview_questions))
        .route("/{question_id}", get(get_interview_question))
        .route(
            "/",
            post(create_interview_question).route_layer(from_fn(allow_admin)),
        )
        .route(
            "/{question_id}",
            put(edit_interview_question).route_layer(from_fn(allow_admin)),
        )
        .route(
            "/{question_id}/toggle",
            put(toggle_interview_question).route_layer(from_fn(allow_admin)),
        )
        .route(
            "/{question_id}",
            delete(delete_interview_question).route_layer(from_fn(allow_admin)),
        )
}
