//! `/courses` route group.
//!
//! Reads are public (non-admins only see public, approved courses); all
//! mutations are admin-only. Courses are never hard-deleted — `DELETE`
//! hides the course from the catalog.

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

use delete::delete_course;
use get::{get_course, get_course_thumbnail, list_courses};
use post::{create_course, upload_course_thumbnail};
use put::{edit_course, set_course_featured, set_course_moderation, set_course_published};

pub fn courses_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses))
        .route("/{course_id}", get(get_course))
        .route("/{course_id}/thumbnail", get(get_course_thumbnail))
        .route("/", post(create_course).route_layer(from_fn(allow_admin)))
        .route(
            "/{course_id}",
            put(edit_course).route_layer(from_fn(allow_admin)),
        )
        .route(
            "/{course_id}",
            delete(delete_course).route_layer(from_fn(allow_admin)),
        )
        .route(
            "/{course_id}/moderation",
            put(set_course_moderation).route_layer(from_fn(allow_admin)),
        )
        .route(
            "/{course_id}/publish",
            put(set_course_published).route_layer(from_fn(allow_admin)),
        )
        .route(
            "/{course_id}/feature",
            put(set_course_featured).route_layer(from_fn(allow_admin)),
        )
        .route(
            "/{course_id}/thumbnail",
            post(upload_course_thumbnail).route_layer(from_fn(allow_admin)),
        )
}
