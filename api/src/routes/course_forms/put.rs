use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use common::{format_validation_errors, state::AppState};
use db::models::course_form::{
    ActiveModel as FormActiveModel, CourseFormError, Entity as FormEntity, FormStatus,
    Model as FormModel,
};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait};
use serde::Deserialize;
use std::str::FromStr;
use validator::Validate;

use crate::response::ApiResponse;

async fn find_form(
    app_state: &AppState,
    form_id: i64,
) -> Result<FormModel, (StatusCode, Json<ApiResponse<Option<FormModel>>>)> {
    match FormEntity::find_by_id(form_id).one(app_state.db()).await {
        Ok(Some(form)) => Ok(form),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Course form not found")),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {}", e))),
        )),
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SetFormStatusRequest {
    pub status: String,

    #[validate(length(max = 1000, message = "Admin notes must be at most 1000 characters"))]
    pub admin_notes: Option<String>,
}

/// PUT /api/course-forms/{form_id}/status
///
/// Moves a form along the workflow. Admin only.
///
/// ### Responses
/// - `200 OK` with the updated form
/// - `400 Bad Request` on an unknown status value
/// - `422 Unprocessable Entity` when the workflow forbids the move
pub async fn set_course_form_status(
    State(app_state): State<AppState>,
    Path(form_id): Path<i64>,
    Json(req): Json<SetFormStatusRequest>,
) -> (StatusCode, Json<ApiResponse<Option<FormModel>>>) {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    let next = match FormStatus::from_str(&req.status) {
        Ok(status) => status,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("Invalid status value")),
            );
        }
    };

    let form = match find_form(&app_state, form_id).await {
        Ok(form) => form,
        Err(resp) => return resp,
    };

    match form
        .transition(app_state.db(), next, req.admin_notes.as_deref())
        .await
    {
        Ok(updated) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Some(updated),
                "Course form status updated successfully",
            )),
        ),
        Err(CourseFormError::InvalidTransition { from, to }) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::error(format!(
                "Cannot move form from {} to {}",
                from, to
            ))),
        ),
        Err(CourseFormError::Db(e)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {}", e))),
        ),
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct EditCourseFormRequest {
    #[validate(length(min = 1, max = 100, message = "Name must not be empty"))]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(min = 10, max = 16, message = "Mobile number must be 10-16 characters"))]
    pub mobile: Option<String>,

    #[validate(length(max = 1000, message = "Admin notes must be at most 1000 characters"))]
    pub admin_notes: Option<String>,
}

/// PUT /api/course-forms/{form_id}
///
/// Corrects contact details or replaces the admin notes. Admin only. Status
/// is not editable here; use the status endpoint.
pub async fn edit_course_form(
    State(app_state): State<AppState>,
    Path(form_id): Path<i64>,
    Json(req): Json<EditCourseFormRequest>,
) -> (StatusCode, Json<ApiResponse<Option<FormModel>>>) {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    let form = match find_form(&app_state, form_id).await {
        Ok(form) => form,
        Err(resp) => return resp,
    };

    let mut active: FormActiveModel = form.into();
    if let Some(name) = req.name {
        active.name = Set(name);
    }
    if let Some(email) = req.email {
        active.email = Set(email.to_lowercase());
    }
    if let Some(mobile) = req.mobile {
        active.mobile = Set(mobile);
    }
    if let Some(notes) = req.admin_notes {
        active.admin_notes = Set(Some(notes));
    }
    active.updated_at = Set(Utc::now());

    match active.update(app_state.db()).await {
        Ok(updated) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Some(updated),
                "Course form updated successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {}", e))),
        ),
    }
}
