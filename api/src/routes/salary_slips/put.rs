use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use common::{format_validation_errors, state::AppState};
use db::models::salary_slip::{
    ActiveModel as SlipActiveModel, EmploymentStatus, Entity as SlipEntity, Model as SlipModel,
};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait};
use serde::Deserialize;
use std::str::FromStr;
use validator::Validate;

use crate::response::ApiResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct EditSalarySlipRequest {
    #[validate(length(min = 1, max = 100, message = "Designation must not be empty"))]
    pub designation: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Department must not be empty"))]
    pub department: Option<String>,

    #[validate(length(min = 6, max = 34, message = "Bank account number must be 6-34 characters"))]
    pub bank_account_number: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Bank name must not be empty"))]
    pub bank_name: Option<String>,

    #[validate(length(min = 11, max = 11, message = "IFSC code must be 11 characters"))]
    pub bank_ifsc_code: Option<String>,

    pub address: Option<serde_json::Value>,
}

async fn find_slip(
    app_state: &AppState,
    slip_id: i64,
) -> Result<SlipModel, (StatusCode, Json<ApiResponse<Option<SlipModel>>>)> {
    match SlipEntity::find_by_id(slip_id).one(app_state.db()).await {
        Ok(Some(slip)) => Ok(slip),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Salary slip not found")),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {}", e))),
        )),
    }
}

/// PUT /api/salary-slips/{slip_id}
///
/// Partial update of slip fields. Admin only. The salary amount cannot be
/// edited here; use the revisions endpoint so the history stays consistent.
pub async fn edit_salary_slip(
    State(app_state): State<AppState>,
    Path(slip_id): Path<i64>,
    Json(req): Json<EditSalarySlipRequest>,
) -> (StatusCode, Json<ApiResponse<Option<SlipModel>>>) {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    let slip = match find_slip(&app_state, slip_id).await {
        Ok(slip) => slip,
        Err(resp) => return resp,
    };

    let mut active: SlipActiveModel = slip.into();
    if let Some(designation) = req.designation {
        active.designation = Set(designation);
    }
    if let Some(department) = req.department {
        active.department = Set(department);
    }
    if let Some(account) = req.bank_account_number {
        active.bank_account_number = Set(account);
    }
    if let Some(bank_name) = req.bank_name {
        active.bank_name = Set(bank_name);
    }
    if let Some(ifsc) = req.bank_ifsc_code {
        active.bank_ifsc_code = Set(ifsc.to_uppercase());
    }
    if let Some(address) = req.address {
        active.address = Set(address);
    }
    active.updated_at = Set(Utc::now());

    match active.update(app_state.db()).await {
        Ok(updated) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Some(updated),
                "Salary slip updated successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {}", e))),
        ),
    }
}

#[derive(Debug, Deserialize)]
pub struct SetEmploymentStatusRequest {
    pub status: String,
}

/// PUT /api/salary-slips/{slip_id}/status
///
/// Sets the employment status (`active`, `on_leave`, `resigned`,
/// `terminated`). Admin only.
pub async fn set_salary_slip_status(
    State(app_state): State<AppState>,
    Path(slip_id): Path<i64>,
    Json(req): Json<SetEmploymentStatusRequest>,
) -> (StatusCode, Json<ApiResponse<Option<SlipModel>>>) {
    let status = match EmploymentStatus::from_str(&req.status) {
        Ok(status) => status,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(
                    "Invalid status; expected active, on_leave, resigned or terminated",
                )),
            );
        }
    };

    let slip = match find_slip(&app_state, slip_id).await {
        Ok(slip) => slip,
        Err(resp) => return resp,
    };

    match slip.set_status(app_state.db(), status).await {
        Ok(updated) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Some(updated),
                "Employment status updated successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {}", e))),
        ),
    }
}
