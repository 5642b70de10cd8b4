//! `/job-postings` route group.
//!
//! Reads are public; mutations are admin-only. Postings are soft-deleted
//! and a deleted posting never appears again in reads.

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

use delete::delete_job_posting;
use get::{get_job_posting, list_job_postings};
use post::create_job_posting;
use put::{edit_job_posting, toggle_job_posting_status};

pub fn job_postings_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_job_postings))
        .route("/{posting_id}", get(get_job_posting))
        .route(
            "/",
            post(create_job_posting).route_layer(from_fn(allow_admin)),
        )
        .route(
            "/{posting_id}",
            put(edit_job_posting).route_layer(from_fn(allow_admin)),
        )
        .route(
            "/{posting_id}/status",
            put(toggle_job_posting_status).route_layer(from_fn(allow_admin)),
        )
        .route(
            "/{posting_id}",
            delete(delete_job_posting).route_layer(from_fn(allow_admin)),
        )
}
