use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use common::{format_validation_errors, state::AppState};
use db::models::interview_question::{
    ActiveModel as QuestionActiveModel, Entity as QuestionEntity, Model as QuestionModel,
};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait};
use serde::Deserialize;
use validator::Validate;

use crate::response::ApiResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct EditQuestionRequest {
    #[validate(length(min = 1, max = 1000, message = "Question must be 1-1000 characters"))]
    pub question: Option<String>,

    #[validate(length(min = 1, message = "At least one answer point is required"))]
    pub answer: Option<Vec<String>>,
}

async fn find_question(
    app_state: &AppState,
    question_id: i64,
) -> Result<QuestionModel, (StatusCode, Json<ApiResponse<Option<QuestionModel>>>)> {
    match QuestionEntity::find_by_id(question_id)
        .one(app_state.db())
        .await
    {
        Ok(Some(question)) => Ok(question),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Interview question not found")),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {}", e))),
        )),
    }
}

/// PUT /api/interview-questions/{question_id}
///
/// Partial update of question text and/or answer points. Admin only.
pub async fn edit_interview_question(
    State(app_state): State<AppState>,
    Path(question_id): Path<i64>,
    Json(req): Json<EditQuestionRequest>,
) -> (StatusCode, Json<ApiResponse<Option<QuestionModel>>>) {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    let question = match find_question(&app_state, question_id).await {
        Ok(question) => question,
        Err(resp) => return resp,
    };

    let mut active: QuestionActiveModel = question.into();
    if let Some(text) = req.question {
        active.question = Set(text);
    }
    if let Some(answer) = req.answer {
        active.answer = Set(serde_json::json!(answer));
    }
    active.updated_at = Set(Utc::now());

    match active.update(app_state.db()).await {
        Ok(updated) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Some(updated),
                "Interview question updated successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {}", e))),
        ),
    }
}

/// PUT /api/interview-questions/{question_id}/toggle
///
/// Flips the active flag. Admin only. Two calls restore the original value.
pub async fn toggle_interview_question(
    State(app_state): State<AppState>,
    Path(question_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<Option<QuestionModel>>>) {
    let question = match find_question(&app_state, question_id).await {
        Ok(question) => question,
        Err(resp) => return resp,
    };

    match question.toggle_active(app_state.db()).await {
        Ok(updated) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Some(updated),
                "Interview question toggled successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {}", e))),
        ),
    }
}
