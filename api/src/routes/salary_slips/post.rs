use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use common::{format_validation_errors, state::AppState};
use db::models::salary_revision::Model as RevisionModel;
use db::models::salary_slip::{Entity as SlipEntity, Model as SlipModel};
use db::models::user::Entity as UserEntity;
use sea_orm::EntityTrait;
use serde::Deserialize;
use validator::Validate;

use crate::response::ApiResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSalarySlipRequest {
    pub user_id: i64,

    #[validate(length(min = 1, max = 100, message = "Designation is required"))]
    pub designation: String,

    #[validate(length(min = 1, max = 100, message = "Department is required"))]
    pub department: String,

    #[validate(range(min = 0.0, message = "Salary must not be negative"))]
    pub salary: f64,

    #[validate(length(min = 6, max = 34, message = "Bank account number must be 6-34 characters"))]
    pub bank_account_number: String,

    #[validate(length(min = 1, max = 100, message = "Bank name is required"))]
    pub bank_name: String,

    #[validate(length(min = 11, max = 11, message = "IFSC code must be 11 characters"))]
    pub bank_ifsc_code: String,

    #[serde(default)]
    pub address: serde_json::Value,
}

/// POST /api/salary-slips
///
/// Creates a payroll record for an existing user. Admin only. The initial
/// salary is also written to the revision history so the history is never
/// empty.
///
/// ### Responses
/// - `201 Created` with the new slip
/// - `400 Bad Request` on validation failure
/// - `404 Not Found` if `user_id` does not exist
pub async fn create_salary_slip(
    State(app_state): State<AppState>,
    Json(req): Json<CreateSalarySlipRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Option<SlipModel>>::error(
                format_validation_errors(&validation_errors),
            )),
        );
    }

    let db = app_state.db();

    match UserEntity::find_by_id(req.user_id).one(db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<Option<SlipModel>>::error("User not found")),
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
    }

    let slip = match SlipModel::create(
        db,
        req.user_id,
        &req.designation,
        &req.department,
        req.salary,
        &req.bank_account_number,
        &req.bank_name,
        &req.bank_ifsc_code,
        req.address,
    )
    .await
    {
        Ok(slip) => slip,
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

    if let Err(e) =
        RevisionModel::create(db, slip.id, slip.salary, Some("initial"), slip.created_at).await
    {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Option<SlipModel>>::error(format!(
                "Database error: {}",
                e
            ))),
        );
    }

    (
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(slip),
            "Salary slip created successfully",
        )),
    )
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddRevisionRequest {
    #[validate(range(min = 0.0, message = "Amount must not be negative"))]
    pub amount: f64,

    #[validate(length(max = 500, message = "Note must be at most 500 characters"))]
    pub note: Option<String>,

    pub effective_from: Option<DateTime<Utc>>,
}

/// POST /api/salary-slips/{slip_id}/revisions
///
/// Appends a salary revision and updates the slip's current salary. Admin
/// only. `effective_from` defaults to now.
pub async fn add_salary_revision(
    State(app_state): State<AppState>,
    Path(slip_id): Path<i64>,
    Json(req): Json<AddRevisionRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Option<RevisionModel>>::error(
                format_validation_errors(&validation_errors),
            )),
        );
    }

    let db = app_state.db();

    let slip = match SlipEntity::find_by_id(slip_id).one(db).await {
        Ok(Some(slip)) => slip,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<Option<RevisionModel>>::error(
                    "Salary slip not found",
                )),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Option<RevisionModel>>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    let effective_from = req.effective_from.unwrap_or_else(Utc::now);

    let revision = match RevisionModel::create(
        db,
        slip.id,
        req.amount,
        req.note.as_deref(),
        effective_from,
    )
    .await
    {
        Ok(revision) => revision,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Option<RevisionModel>>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    if let Err(e) = slip.set_salary(db, req.amount).await {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Option<RevisionModel>>::error(format!(
                "Database error: {}",
                e
            ))),
        );
    }

    (
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(revision),
            "Salary revision recorded successfully",
        )),
    )
}
