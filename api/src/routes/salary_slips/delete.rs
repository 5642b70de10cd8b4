use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::state::AppState;
use db::models::salary_slip::{Entity as SlipEntity, Model as SlipModel};
use sea_orm::{EntityTrait, ModelTrait};

use crate::response::ApiResponse;

/// DELETE /api/salary-slips/{slip_id}
///
/// Hard-deletes a slip and its revision history (cascade). Admin only.
pub async fn delete_salary_slip(
    State(app_state): State<AppState>,
    Path(slip_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    let slip = match SlipEntity::find_by_id(slip_id).one(db).await {
        Ok(Some(slip)) => slip,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<Option<SlipModel>>::error(
                    "Salary slip not found",
                )),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Option<SlipModel>>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    match slip.delete(db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(ApiResponse::<Option<SlipModel>>::success(
                None,
                "Salary slip deleted successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Option<SlipModel>>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}
