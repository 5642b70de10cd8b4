//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → liveness probe (public)
//! - `/auth` → register/login, profile, OTP password reset
//! - `/users` → user administration (admin-only)
//! - `/courses` → catalog, moderation, publish/feature toggles, thumbnails
//! - `/job-postings` → job-fair CRUD, status toggle, soft delete
//! - `/salary-slips` → payroll records and revision history (admin-only)
//! - `/interview-questions` → course Q&A with active toggle
//! - `/course-forms` → public enquiry intake + admin workflow
//! - `/ebooks` → uploads and streamed downloads

use crate::auth::guards::allow_admin;
use ::common::state::AppState;
use axum::{Router, middleware::from_fn};

pub mod auth;
pub mod common;
pub mod course_forms;
pub mod courses;
pub mod ebooks;
pub mod health;
pub mod interview_questions;
pub mod job_postings;
pub mod salary_slips;
pub mod users;

/// Builds the complete application router. Per-route guards live inside the
/// entity routers; group-wide guards are applied here.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health::health_routes())
        .nest("/auth", auth::auth_routes())
        .nest(
            "/users",
            users::users_routes().route_layer(from_fn(allow_admin)),
        )
        .nest("/courses", courses::courses_routes())
        .nest("/job-postings", job_postings::job_postings_routes())
        .nest(
            "/salary-slips",
            salary_slips::salary_slips_routes().route_layer(from_fn(allow_admin)),
        )
        .nest(
            "/interview-questions",
            interview_questions::interview_questions_routes(),
        )
        .nest("/course-forms", course_forms::course_forms_routes())
        .nest("/ebooks", ebooks::ebooks_routes())
        .with_state(app_state)
}
