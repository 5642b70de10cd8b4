//! `/salary-slips` route group: payroll administration. The whole group is
//! mounted behind the admin guard; nothing here is public.
//!
//! Salary changes are append-only: `POST /{slip_id}/revisions` records the
//! new amount in the history and updates the slip's current salary.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use common::state::AppState;

pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use delete::delete_salary_slip;
use get::{get_salary_slip, list_salary_slips};
use post::{add_salary_revision, create_salary_slip};
use put::{edit_salary_slip, set_salary_slip_status};

pub fn salary_slips_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_salary_slips))
        .route("/", post(create_salary_slip))
        .route("/{slip_id}", get(get_salary_slip))
        .route("/{slip_id}", put(edit_salary_slip))
        .route("/{slip_id}", delete(delete_salary_slip))
        .route("/{slip_id}/status", put(set_salary_slip_status))
        .route("/{slip_id}/revisions", post(add_salary_revision))
}
