use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::{paths, state::AppState};
use db::models::course::Entity as CourseEntity;
use db::models::ebook::Model as EbookModel;
use mime_guess::from_path;
use sea_orm::EntityTrait;

use crate::response::ApiResponse;

const ALLOWED_EBOOK_EXTENSIONS: [&str; 3] = ["pdf", "epub", "mobi"];

/// POST /api/ebooks
///
/// Multipart upload of an ebook. Admin only. Expects fields `course_id`,
/// `title` and `file`. Accepted extensions: pdf, epub, mobi. The file is
/// stored under a fresh public ID.
///
/// ### Responses
/// - `201 Created` with the new ebook
/// - `400 Bad Request` on missing or invalid fields
/// - `404 Not Found` if the course does not exist
pub async fn upload_ebook(
    State(app_state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let db = app_state.db();

    let mut course_id: Option<i64> = None;
    let mut title: Option<String> = None;
    let mut file_part: Option<(String, Vec<u8>)> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        match field.name() {
            Some("course_id") => {
                let text = field.text().await.unwrap_or_default();
                course_id = text.trim().parse().ok();
            }
            Some("title") => {
                title = Some(field.text().await.unwrap_or_default());
            }
            Some("file") => {
                let filename = field.file_name().unwrap_or("").to_string();
                match field.bytes().await {
                    Ok(bytes) => file_part = Some((filename, bytes.to_vec())),
                    Err(_) => {
                        return (
                            StatusCode::BAD_REQUEST,
                            Json(ApiResponse::<Option<EbookModel>>::error(
                                "Failed to read uploaded file",
                            )),
                        );
                    }
                }
            }
            _ => {}
        }
    }

    let Some(course_id) = course_id else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Option<EbookModel>>::error(
                "Missing or invalid 'course_id' field",
            )),
        );
    };
    let title = match title {
        Some(t) if !t.trim().is_empty() => t.trim().to_string(),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<Option<EbookModel>>::error(
                    "Missing 'title' field",
                )),
            );
        }
    };
    let Some((filename, bytes)) = file_part else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Option<EbookModel>>::error(
                "Missing 'file' field in multipart upload",
            )),
        );
    };
    if bytes.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Option<EbookModel>>::error(
                "Uploaded file is empty",
            )),
        );
    }

    let ext = filename
        .rsplit('.')
        .next()
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    if !ALLOWED_EBOOK_EXTENSIONS.contains(&ext.as_str()) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Option<EbookModel>>::error(
                "Unsupported file type; use pdf, epub or mobi",
            )),
        );
    }

    match CourseEntity::find_by_id(course_id).one(db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<Option<EbookModel>>::error("Course not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Option<EbookModel>>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    }

    let public_id = EbookModel::new_public_id();
    let path = paths::ebook_file_path(&public_id, &ext);
    if paths::ensure_parent_dirs(&path).is_err() {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Option<EbookModel>>::error(
                "Failed to prepare storage directory",
            )),
        );
    }
    if tokio::fs::write(&path, &bytes).await.is_err() {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Option<EbookModel>>::error(
                "Failed to save uploaded file",
            )),
        );
    }

    let mime_type = from_path(&path).first_or_octet_stream().to_string();

    match EbookModel::create(
        db,
        course_id,
        &title,
        &public_id,
        &path.to_string_lossy(),
        &mime_type,
    )
    .await
    {
        Ok(ebook) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                Some(ebook),
                "Ebook uploaded successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Option<EbookModel>>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}
