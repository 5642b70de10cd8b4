use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::{format_validation_errors, paths, state::AppState};
use db::models::course::{Entity as CourseEntity, Model as CourseModel};
use sea_orm::EntityTrait;
use serde::Deserialize;
use tracing::warn;
use validator::Validate;

use crate::response::ApiResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(length(min = 1, max = 100, message = "Category is required"))]
    pub category: String,

    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,

    #[serde(default)]
    pub is_free: bool,

    #[serde(default)]
    pub tags: Vec<String>,
}

const ALLOWED_IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "png", "gif", "webp"];

/// POST /api/courses
///
/// Creates a course. Admin only. New courses start public, unpublished and
/// pending moderation; a free course has its price forced to zero.
///
/// ### Responses
/// - `201 Created` with the new course
/// - `400 Bad Request` on validation failure
pub async fn create_course(
    State(app_state): State<AppState>,
    Json(req): Json<CreateCourseRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Option<CourseModel>>::error(
                format_validation_errors(&validation_errors),
            )),
        );
    }

    match CourseModel::create(
        app_state.db(),
        &req.title,
        &req.description,
        &req.category,
        req.price,
        req.is_free,
        req.tags,
    )
    .await
    {
        Ok(course) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                Some(course),
                "Course created successfully",
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

/// POST /api/courses/{course_id}/thumbnail
///
/// Multipart upload of a course thumbnail image. Admin only. Replaces any
/// previous thumbnail. Accepted extensions: jpg, png, gif, webp.
pub async fn upload_course_thumbnail(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
    mut multipart: Multipart,
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

    let mut file_bytes: Option<(String, Vec<u8>)> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("").to_string();
        match field.bytes().await {
            Ok(bytes) => file_bytes = Some((filename, bytes.to_vec())),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<Option<CourseModel>>::error(
                        "Failed to read uploaded file",
                    )),
                );
            }
        }
    }

    let Some((filename, bytes)) = file_bytes else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Option<CourseModel>>::error(
                "Missing 'file' field in multipart upload",
            )),
        );
    };

    if bytes.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Option<CourseModel>>::error(
                "Uploaded file is empty",
            )),
        );
    }

    let ext = filename
        .rsplit('.')
        .next()
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    if !ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Option<CourseModel>>::error(
                "Unsupported image type; use jpg, png, gif or webp",
            )),
        );
    }

    let path = paths::course_thumbnail_path(course_id, &ext);
    let new_path = path.to_string_lossy().to_string();
    let previous_path = course.thumbnail_path.clone();
    if paths::ensure_parent_dirs(&path).is_err() {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Option<CourseModel>>::error(
                "Failed to prepare storage directory",
            )),
        );
    }
    if tokio::fs::write(&path, &bytes).await.is_err() {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Option<CourseModel>>::error(
                "Failed to save uploaded file",
            )),
        );
    }

    match course.set_thumbnail_path(db, &new_path).await {
        Ok(updated) => {
            // A re-upload with a different extension writes a new file;
            // the old one goes with it.
            if let Some(old_path) = previous_path.filter(|p| *p != new_path) {
                if let Err(e) = tokio::fs::remove_file(&old_path).await {
                    warn!(path = %old_path, "failed to remove replaced thumbnail: {}", e);
                }
            }
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    Some(updated),
                    "Thumbnail uploaded successfully",
                )),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Option<CourseModel>>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}
