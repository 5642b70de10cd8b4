use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use common::{format_validation_errors, state::AppState};
use db::models::job_posting::{
    ActiveModel as PostingActiveModel, JobType, Model as PostingModel,
};
use sea_orm::{ActiveModelTrait, ActiveValue::Set};
use serde::Deserialize;
use std::str::FromStr;
use validator::Validate;

use crate::response::ApiResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct EditJobPostingRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 200, message = "Company name must not be empty"))]
    pub company_name: Option<String>,

    #[validate(url(message = "Job link must be a valid URL"))]
    pub job_link: Option<String>,

    pub job_type: Option<String>,

    #[validate(range(min = 0.0, message = "Salary must not be negative"))]
    pub salary: Option<f64>,

    pub application_deadline: Option<DateTime<Utc>>,
}

async fn find_live_posting(
    app_state: &AppState,
    posting_id: i64,
) -> Result<PostingModel, (StatusCode, Json<ApiResponse<Option<PostingModel>>>)> {
    match PostingModel::find_live(app_state.db(), posting_id).await {
        Ok(Some(posting)) => Ok(posting),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Job posting not found")),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {}", e))),
        )),
    }
}

/// PUT /api/job-postings/{posting_id}
///
/// Partial update of posting fields. Admin only. Soft-deleted postings
/// cannot be edited and answer `404`.
pub async fn edit_job_posting(
    State(app_state): State<AppState>,
    Path(posting_id): Path<i64>,
    Json(req): Json<EditJobPostingRequest>,
) -> (StatusCode, Json<ApiResponse<Option<PostingModel>>>) {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    let job_type = match req.job_type.as_deref() {
        Some(raw) => match JobType::from_str(raw) {
            Ok(job_type) => Some(job_type),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::error(
                        "Invalid job_type; expected full_time, part_time, internship or contract",
                    )),
                );
            }
        },
        None => None,
    };

    let posting = match find_live_posting(&app_state, posting_id).await {
        Ok(posting) => posting,
        Err(resp) => return resp,
    };

    let mut active: PostingActiveModel = posting.into();
    if let Some(title) = req.title {
        active.title = Set(title);
    }
    if let Some(company_name) = req.company_name {
        active.company_name = Set(company_name);
    }
    if let Some(job_link) = req.job_link {
        active.job_link = Set(Some(job_link));
    }
    if let Some(job_type) = job_type {
        active.job_type = Set(job_type);
    }
    if let Some(salary) = req.salary {
        active.salary = Set(Some(salary));
    }
    if let Some(deadline) = req.application_deadline {
        active.application_deadline = Set(deadline);
    }
    active.updated_at = Set(Utc::now());

    match active.update(app_state.db()).await {
        Ok(updated) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Some(updated),
                "Job posting updated successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {}", e))),
        ),
    }
}

/// PUT /api/job-postings/{posting_id}/status
///
/// Flips the posting between `active` and `closed`. Admin only. Two calls
/// restore the original status.
pub async fn toggle_job_posting_status(
    State(app_state): State<AppState>,
    Path(posting_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<Option<PostingModel>>>) {
    let posting = match find_live_posting(&app_state, posting_id).await {
        Ok(posting) => posting,
        Err(resp) => return resp,
    };

    match posting.toggle_status(app_state.db()).await {
        Ok(updated) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Some(updated),
                "Job posting status updated successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {}", e))),
        ),
    }
}
