use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use common::{format_validation_errors, state::AppState};
use db::models::job_posting::{JobType, Model as PostingModel};
use serde::Deserialize;
use std::str::FromStr;
use validator::Validate;

use crate::response::ApiResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateJobPostingRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 200, message = "Company name is required"))]
    pub company_name: String,

    #[validate(url(message = "Job link must be a valid URL"))]
    pub job_link: Option<String>,

    pub job_type: String,

    #[validate(range(min = 0.0, message = "Salary must not be negative"))]
    pub salary: Option<f64>,

    pub application_deadline: DateTime<Utc>,
}

/// POST /api/job-postings
///
/// Creates a posting. Admin only. New postings start `active`.
///
/// ### Responses
/// - `201 Created` with the new posting
/// - `400 Bad Request` on validation failure or unknown `job_type`
pub async fn create_job_posting(
    State(app_state): State<AppState>,
    Json(req): Json<CreateJobPostingRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Option<PostingModel>>::error(
                format_validation_errors(&validation_errors),
            )),
        );
    }

    let job_type = match JobType::from_str(&req.job_type) {
        Ok(job_type) => job_type,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<Option<PostingModel>>::error(
                    "Invalid job_type; expected full_time, part_time, internship or contract",
                )),
            );
        }
    };

    match PostingModel::create(
        app_state.db(),
        &req.title,
        &req.company_name,
        req.job_link.as_deref(),
        job_type,
        req.salary,
        req.application_deadline,
    )
    .await
    {
        Ok(posting) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                Some(posting),
                "Job posting created successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Option<PostingModel>>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}
