use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::state::AppState;
use db::models::course_form::{Entity as FormEntity, Model as FormModel};
use sea_orm::{EntityTrait, ModelTrait};

use crate::response::ApiResponse;

/// DELETE /api/course-forms/{form_id}
///
/// Hard-deletes a form. Admin only.
pub async fn delete_course_form(
    State(app_state): State<AppState>,
    Path(form_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    let form = match FormEntity::find_by_id(form_id).one(db).await {
        Ok(Some(form)) => form,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<Option<FormModel>>::error(
                    "Course form not found",
                )),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Option<FormModel>>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    match form.delete(db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(ApiResponse::<Option<FormModel>>::success(
                None,
                "Course form deleted successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Option<FormModel>>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}
