use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::state::AppState;
use db::models::interview_question::{Entity as QuestionEntity, Model as QuestionModel};
use sea_orm::{EntityTrait, ModelTrait};

use crate::response::ApiResponse;

/// DELETE /api/interview-questions/{question_id}
///
/// Hard-deletes a question. Admin only.
pub async fn delete_interview_question(
    State(app_state): State<AppState>,
    Path(question_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    let question = match QuestionEntity::find_by_id(question_id).one(db).await {
        Ok(Some(question)) => question,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<Option<QuestionModel>>::error(
                    "Interview question not found",
                )),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Option<QuestionModel>>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    match question.delete(db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(ApiResponse::<Option<QuestionModel>>::success(
                None,
                "Interview question deleted successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Option<QuestionModel>>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}
