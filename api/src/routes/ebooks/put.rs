use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use common::{format_validation_errors, state::AppState};
use db::models::ebook::{
    ActiveModel as EbookActiveModel, Entity as EbookEntity, Model as EbookModel,
};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait};
use serde::Deserialize;
use validator::Validate;

use crate::response::ApiResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct EditEbookRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
}

/// PUT /api/ebooks/{ebook_id}
///
/// Updates ebook metadata. Admin only. Replacing the file means deleting
/// and re-uploading.
pub async fn edit_ebook(
    State(app_state): State<AppState>,
    Path(ebook_id): Path<i64>,
    Json(req): Json<EditEbookRequest>,
) -> (StatusCode, Json<ApiResponse<Option<EbookModel>>>) {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    let ebook = match EbookEntity::find_by_id(ebook_id).one(app_state.db()).await {
        Ok(Some(ebook)) => ebook,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Ebook not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {}", e))),
            );
        }
    };

    let mut active: EbookActiveModel = ebook.into();
    if let Some(title) = req.title {
        active.title = Set(title);
    }
    active.updated_at = Set(Utc::now());

    match active.update(app_state.db()).await {
        Ok(updated) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Some(updated),
                "Ebook updated successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {}", e))),
        ),
    }
}
