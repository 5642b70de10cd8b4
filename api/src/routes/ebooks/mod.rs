//! `/ebooks` route group.
//!
//! Listing and downloads are public; upload, edit and delete are admin-only.
//! Files are streamed from disk, never buffered whole.

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

use delete::delete_ebook;
use get::{download_ebook, list_ebooks};
use post::upload_ebook;
use put::edit_ebook;

pub fn ebooks_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_ebooks))
        .route("/{ebook_id}/download", get(download_ebook))
        .route("/", post(upload_ebook).route_layer(from_fn(allow_admin)))
        .route(
            "/{ebook_id}",
            put(edit_ebook).route_layer(from_fn(allow_admin)),
        )
        .route(
            "/{ebook_id}",
            delete(delete_ebook).route_layer(from_fn(allow_admin)),
        )
}
