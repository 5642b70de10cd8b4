use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::state::AppState;
use db::models::ebook::{Entity as EbookEntity, Model as EbookModel};
use sea_orm::{EntityTrait, ModelTrait};
use tracing::warn;

use crate::response::ApiResponse;

/// DELETE /api/ebooks/{ebook_id}
///
/// Deletes the row, then removes the file from disk. A missing file is
/// logged and not treated as an error.
pub async fn delete_ebook(
    State(app_state): State<AppState>,
    Path(ebook_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    let ebook = match EbookEntity::find_by_id(ebook_id).one(db).await {
        Ok(Some(ebook)) => ebook,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<Option<EbookModel>>::error("Ebook not found")),
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
    };

    let file_path = ebook.file_path.clone();

    if let Err(e) = ebook.delete(db).await {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Option<EbookModel>>::error(format!(
                "Database error: {}",
                e
            ))),
        );
    }

    if let Err(e) = tokio::fs::remove_file(&file_path).await {
        warn!(path = %file_path, "failed to remove ebook file: {}", e);
    }

    (
        StatusCode::OK,
        Json(ApiResponse::<Option<EbookModel>>::success(
            None,
            "Ebook deleted successfully",
        )),
    )
}
