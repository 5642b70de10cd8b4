use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::state::AppState;
use db::models::job_posting::Model as PostingModel;

use crate::response::ApiResponse;

/// DELETE /api/job-postings/{posting_id}
///
/// Soft-deletes a posting. Admin only. An already-deleted posting answers
/// `404` (it is no longer visible to the API).
pub async fn delete_job_posting(
    State(app_state): State<AppState>,
    Path(posting_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    let posting = match PostingModel::find_live(db, posting_id).await {
        Ok(Some(posting)) => posting,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<Option<PostingModel>>::error(
                    "Job posting not found",
                )),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Option<PostingModel>>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    match posting.soft_delete(db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(ApiResponse::<Option<PostingModel>>::success(
                None,
                "Job posting deleted successfully",
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
