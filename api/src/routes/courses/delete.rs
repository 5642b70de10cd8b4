use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::state::AppState;
use db::models::course::{Entity as CourseEntity, Model as CourseModel};
use sea_orm::EntityTrait;

use crate::response::ApiResponse;

/// DELETE /api/courses/{course_id}
///
/// Removes a course from the catalog by hiding it. Admin only. Idempotent:
/// deleting an already-hidden course still answers `200`.
pub async fn delete_course(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    let course = match CourseEntity::find_by_id(course_id).one(db).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<Option<CourseModel>>::error("Course not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Option<CourseModel>>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    match course.hide(db).await {
        Ok(hidden) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Some(hidden),
                "Course deleted successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Option<CourseModel>>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}
