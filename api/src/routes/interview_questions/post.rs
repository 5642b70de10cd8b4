use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::{format_validation_errors, state::AppState};
use db::models::course::Entity as CourseEntity;
use db::models::interview_question::Model as QuestionModel;
use sea_orm::EntityTrait;
use serde::Deserialize;
use validator::Validate;

use crate::response::ApiResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    pub course_id: i64,

    #[validate(length(min = 1, max = 1000, message = "Question must be 1-1000 characters"))]
    pub question: String,

    #[validate(length(min = 1, message = "At least one answer point is required"))]
    pub answer: Vec<String>,
}

/// POST /api/interview-questions
///
/// Creates a question under an existing course. Admin only. New questions
/// start active.
///
/// ### Responses
/// - `201 Created` with the new question
/// - `400 Bad Request` on validation failure
/// - `404 Not Found` if the course does not exist
pub async fn create_interview_question(
    State(app_state): State<AppState>,
    Json(req): Json<CreateQuestionRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Option<QuestionModel>>::error(
                format_validation_errors(&validation_errors),
            )),
        );
    }

    let db = app_state.db();

    match CourseEntity::find_by_id(req.course_id).one(db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<Option<QuestionModel>>::error(
                    "Course not found",
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
    }

    match QuestionModel::create(db, req.course_id, &req.question, req.answer).await {
        Ok(question) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                Some(question),
                "Interview question created successfully",
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
