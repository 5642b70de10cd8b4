use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::{format_validation_errors, state::AppState};
use db::models::course::Entity as CourseEntity;
use db::models::course_form::Model as FormModel;
use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::EntityTrait;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::response::ApiResponse;

static MOBILE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[0-9]{10,15}$").unwrap()
});

fn validate_mobile(mobile: &str) -> Result<(), ValidationError> {
    if MOBILE_RE.is_match(mobile) {
        Ok(())
    } else {
        Err(ValidationError::new("mobile").with_message("Mobile number must be 10-15 digits".into()))
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitCourseFormRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(custom(function = "validate_mobile"))]
    pub mobile: String,

    pub course_id: i64,
}

/// POST /api/course-forms
///
/// Public enquiry form submission. New forms start `pending`.
///
/// ### Responses
/// - `201 Created` with the new form
/// - `400 Bad Request` on validation failure
/// - `404 Not Found` if the course does not exist
pub async fn submit_course_form(
    State(app_state): State<AppState>,
    Json(req): Json<SubmitCourseFormRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Option<FormModel>>::error(
                format_validation_errors(&validation_errors),
            )),
        );
    }

    let db = app_state.db();

    match CourseEntity::find_by_id(req.course_id).one(db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<Option<FormModel>>::error("Course not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Option<FormModel>>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    }

    match FormModel::create(db, &req.name, &req.email, &req.mobile, req.course_id).await {
        Ok(form) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                Some(form),
                "Course form submitted successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Option<FormModel>>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}
