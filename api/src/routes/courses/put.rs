use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use common::{format_validation_errors, state::AppState};
use db::models::course::{
    ActiveModel as CourseActiveModel, Entity as CourseEntity, Model as CourseModel,
    ModerationStatus,
};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait};
use serde::Deserialize;
use std::str::FromStr;
use validator::Validate;

use crate::response::ApiResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct EditCourseRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Category must not be empty"))]
    pub category: Option<String>,

    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: Option<f64>,

    pub is_free: Option<bool>,
    pub tags: Option<Vec<String>>,
}

/// Looks up the course or returns the error response shared by the PUT
/// handlers in this module.
async fn find_course(
    app_state: &AppState,
    course_id: i64,
) -> Result<CourseModel, (StatusCode, Json<ApiResponse<Option<CourseModel>>>)> {
    match CourseEntity::find_by_id(course_id).one(app_state.db()).await {
        Ok(Some(course)) => Ok(course),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Course not found")),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {}", e))),
        )),
    }
}

/// PUT /api/courses/{course_id}
///
/// Partial update of course fields. Admin only. Setting `is_free` to true
/// forces the price to zero, matching course creation.
pub async fn edit_course(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
    Json(req): Json<EditCourseRequest>,
) -> (StatusCode, Json<ApiResponse<Option<CourseModel>>>) {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    let course = match find_course(&app_state, course_id).await {
        Ok(course) => course,
        Err(resp) => return resp,
    };

    let is_free = req.is_free.unwrap_or(course.is_free);

    let mut active: CourseActiveModel = course.into();
    if let Some(title) = req.title {
        active.title = Set(title);
    }
    if let Some(description) = req.description {
        active.description = Set(description);
    }
    if let Some(category) = req.category {
        active.category = Set(category);
    }
    if let Some(price) = req.price {
        active.price = Set(price);
    }
    if let Some(free) = req.is_free {
        active.is_free = Set(free);
    }
    if is_free {
        active.price = Set(0.0);
    }
    if let Some(tags) = req.tags {
        active.tags = Set(serde_json::json!(tags));
    }
    active.updated_at = Set(Utc::now());

    match active.update(app_state.db()).await {
        Ok(updated) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Some(updated),
                "Course updated successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {}", e))),
        ),
    }
}

#[derive(Debug, Deserialize)]
pub struct SetModerationRequest {
    pub status: String,
}

/// PUT /api/courses/{course_id}/moderation
///
/// Sets the moderation status (`pending`, `approved`, `rejected`). Admin
/// only.
pub async fn set_course_moderation(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
    Json(req): Json<SetModerationRequest>,
) -> (StatusCode, Json<ApiResponse<Option<CourseModel>>>) {
    let status = match ModerationStatus::from_str(&req.status) {
        Ok(status) => status,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(
                    "Invalid moderation status; expected pending, approved or rejected",
                )),
            );
        }
    };

    let course = match find_course(&app_state, course_id).await {
        Ok(course) => course,
        Err(resp) => return resp,
    };

    match course.set_moderation(app_state.db(), status).await {
        Ok(updated) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Some(updated),
                "Moderation status updated successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {}", e))),
        ),
    }
}

#[derive(Debug, Deserialize)]
pub struct SetPublishedRequest {
    pub is_published: bool,
}

/// PUT /api/courses/{course_id}/publish
///
/// Toggles the published flag. Admin only. Idempotent: setting the flag to
/// its current value succeeds with no effect.
pub async fn set_course_published(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
    Json(req): Json<SetPublishedRequest>,
) -> (StatusCode, Json<ApiResponse<Option<CourseModel>>>) {
    let course = match find_course(&app_state, course_id).await {
        Ok(course) => course,
        Err(resp) => return resp,
    };

    match course.set_published(app_state.db(), req.is_published).await {
        Ok(updated) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Some(updated),
                "Publish state updated successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {}", e))),
        ),
    }
}

#[derive(Debug, Deserialize)]
pub struct SetFeaturedRequest {
    pub is_featured: bool,
}

/// PUT /api/courses/{course_id}/feature
///
/// Toggles the featured flag. Admin only.
pub async fn set_course_featured(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
    Json(req): Json<SetFeaturedRequest>,
) -> (StatusCode, Json<ApiResponse<Option<CourseModel>>>) {
    let course = match find_course(&app_state, course_id).await {
        Ok(course) => course,
        Err(resp) => return resp,
    };

    match course.set_featured(app_state.db(), req.is_featured).await {
        Ok(updated) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Some(updated),
                "Featured state updated successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {}", e))),
        ),
    }
}
