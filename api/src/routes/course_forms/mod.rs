//! `/course-forms` route group.
//!
//! The enquiry form is submitted from the public site (no auth); everything
//! else is an admin working the pipeline. Status changes go through the
//! workflow validator and answer `422` when the move is not allowed.

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

use delete::delete_course_form;
use get::{get_course_form, list_course_forms};
use post::submit_course_form;
use put::{edit_course_form, set_course_form_status};

pub fn course_forms_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_course_form))
        .route(
            "/",
            get(list_course_forms).route_layer(from_fn(allow_admin)),
        )
        .route(
            "/{form_id}",
            get(get_course_form).route_layer(from_fn(allow_admin)),
        )
        .route(
            "/{form_id}",
            put(edit_course_form).route_layer(from_fn(allow_admin)),
        )
        .route(
            "/{form_id}/status",
            put(set_course_form_status).route_layer(from_fn(allow_admin)),
        )
        .route(
            "/{form_id}",
            delete(delete_course_form).route_layer(from_fn(allow_admin)),
        )
}
