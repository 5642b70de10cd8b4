use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::{format_validation_errors, state::AppState};
use db::models::salary_revision::Model as RevisionModel;
use db::models::salary_slip::{
    Column as SlipColumn, EmploymentStatus, Entity as SlipEntity, Model as SlipModel,
};
use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use validator::Validate;

use crate::response::ApiResponse;
use crate::routes::common::{non_empty, normalize_pagination, parse_sort};

#[derive(Debug, Deserialize, Validate)]
pub struct ListSalarySlipsQuery {
    #[validate(range(min = 1))]
    pub page: Option<u64>,
    #[validate(range(min = 1, max = 100))]
    pub per_page: Option<u64>,
    pub sort: Option<String>,
    pub query: Option<String>,
    pub department: Option<String>,
    pub status: Option<String>,
    pub user_id: Option<i64>,
}

#[derive(Debug, Serialize, Default)]
pub struct SalarySlipsListResponse {
    pub salary_slips: Vec<SlipModel>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

/// Slip plus its revision history, newest revision first.
#[derive(Debug, Serialize)]
pub struct SalarySlipDetailResponse {
    #[serde(flatten)]
    pub slip: SlipModel,
    pub revisions: Vec<RevisionModel>,
}

/// GET /api/salary-slips
///
/// Paginated payroll list. Admin only.
///
/// ### Query Parameters
/// - `page` / `per_page`: pagination (defaults 1 / 20, per_page max 100)
/// - `query`: substring match against designation OR department
/// - `department`: substring match on department
/// - `status`: `active`, `on_leave`, `resigned` or `terminated`
/// - `user_id`: slips belonging to one user
/// - `sort`: comma-separated fields (`designation`, `department`, `salary`,
///   `created_at`), `-` prefix for descending
pub async fn list_salary_slips(
    State(app_state): State<AppState>,
    Query(query): Query<ListSalarySlipsQuery>,
) -> impl IntoResponse {
    if let Err(e) = query.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<SalarySlipsListResponse>::error(
                format_validation_errors(&e),
            )),
        );
    }

    let db = app_state.db();
    let (page, per_page) = normalize_pagination(query.page, query.per_page);

    let mut condition = Condition::all();

    if let Some(q) = non_empty(query.query) {
        condition = condition.add(
            Condition::any()
                .add(SlipColumn::Designation.contains(&q))
                .add(SlipColumn::Department.contains(&q)),
        );
    }
    if let Some(department) = non_empty(query.department) {
        condition = condition.add(SlipColumn::Department.contains(&department));
    }
    if let Some(status) = non_empty(query.status) {
        match EmploymentStatus::from_str(&status) {
            Ok(s) => condition = condition.add(SlipColumn::Status.eq(s)),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<SalarySlipsListResponse>::error(
                        "Invalid status filter",
                    )),
                );
            }
        }
    }
    if let Some(user_id) = query.user_id {
        condition = condition.add(SlipColumn::UserId.eq(user_id));
    }

    let mut query_builder = SlipEntity::find().filter(condition);

    let sort_fields = parse_sort(query.sort.as_deref());
    if sort_fields.is_empty() {
        query_builder = query_builder.order_by_asc(SlipColumn::Id);
    }
    for (field, desc) in sort_fields {
        let column = match field.as_str() {
            "designation" => SlipColumn::Designation,
            "department" => SlipColumn::Department,
            "salary" => SlipColumn::Salary,
            "created_at" => SlipColumn::CreatedAt,
            _ => continue,
        };
        query_builder = if desc {
            query_builder.order_by_desc(column)
        } else {
            query_builder.order_by_asc(column)
        };
    }

    let paginator = query_builder.paginate(db, per_page);
    let total = paginator.num_items().await.unwrap_or(0);
    let salary_slips = paginator.fetch_page(page - 1).await.unwrap_or_default();

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            SalarySlipsListResponse {
                salary_slips,
                page,
                per_page,
                total,
            },
            "Salary slips retrieved successfully",
        )),
    )
}

/// GET /api/salary-slips/{slip_id}
///
/// Single slip with its full revision history (newest first). Admin only.
pub async fn get_salary_slip(
    State(app_state): State<AppState>,
    Path(slip_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    let slip = match SlipEntity::find_by_id(slip_id).one(db).await {
        Ok(Some(slip)) => slip,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<Option<SalarySlipDetailResponse>>::error(
                    "Salary slip not found",
                )),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Option<SalarySlipDetailResponse>>::error(
                    format!("Database error: {}", e),
                )),
            );
        }
    };

    let revisions = match RevisionModel::find_for_slip(db, slip.id).await {
        Ok(revisions) => revisions,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Option<SalarySlipDetailResponse>>::error(
                    format!("Database error: {}", e),
                )),
            );
        }
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            Some(SalarySlipDetailResponse { slip, revisions }),
            "Salary slip retrieved successfully",
        )),
    )
}
