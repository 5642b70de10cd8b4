use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::{format_validation_errors, state::AppState};
use db::models::job_posting::{
    Column as PostingColumn, Entity as PostingEntity, JobType, Model as PostingModel,
    PostingStatus,
};
use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use validator::Validate;

use crate::response::ApiResponse;
use crate::routes::common::{non_empty, normalize_pagination, parse_sort};

#[derive(Debug, Deserialize, Validate)]
pub struct ListJobPostingsQuery {
    #[validate(range(min = 1))]
    pub page: Option<u64>,
    #[validate(range(min = 1, max = 100))]
    pub per_page: Option<u64>,
    pub sort: Option<String>,
    pub query: Option<String>,
    pub company: Option<String>,
    pub job_type: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize, Default)]
pub struct JobPostingsListResponse {
    pub job_postings: Vec<PostingModel>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

/// GET /api/job-postings
///
/// Paginated list of live (non-deleted) postings.
///
/// ### Query Parameters
/// - `page` / `per_page`: pagination (defaults 1 / 20, per_page max 100)
/// - `query`: substring match against title OR company name
/// - `company`: substring match on company name
/// - `job_type`: `full_time`, `part_time`, `internship` or `contract`
/// - `status`: `active` or `closed`
/// - `sort`: comma-separated fields (`title`, `company_name`, `salary`,
///   `application_deadline`, `created_at`), `-` prefix for descending
pub async fn list_job_postings(
    State(app_state): State<AppState>,
    Query(query): Query<ListJobPostingsQuery>,
) -> impl IntoResponse {
    if let Err(e) = query.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<JobPostingsListResponse>::error(
                format_validation_errors(&e),
            )),
        );
    }

    let db = app_state.db();
    let (page, per_page) = normalize_pagination(query.page, query.per_page);

    let mut condition = Condition::all().add(PostingColumn::DeletedAt.is_null());

    if let Some(q) = non_empty(query.query) {
        condition = condition.add(
            Condition::any()
                .add(PostingColumn::Title.contains(&q))
                .add(PostingColumn::CompanyName.contains(&q)),
        );
    }
    if let Some(company) = non_empty(query.company) {
        condition = condition.add(PostingColumn::CompanyName.contains(&company));
    }
    if let Some(job_type) = non_empty(query.job_type) {
        match JobType::from_str(&job_type) {
            Ok(jt) => condition = condition.add(PostingColumn::JobType.eq(jt)),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<JobPostingsListResponse>::error(
                        "Invalid job_type filter",
                    )),
                );
            }
        }
    }
    if let Some(status) = non_empty(query.status) {
        match PostingStatus::from_str(&status) {
            Ok(s) => condition = condition.add(PostingColumn::Status.eq(s)),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<JobPostingsListResponse>::error(
                        "Invalid status filter",
                    )),
                );
            }
        }
    }

    let mut query_builder = PostingEntity::find().filter(condition);

    let sort_fields = parse_sort(query.sort.as_deref());
    if sort_fields.is_empty() {
        query_builder = query_builder.order_by_asc(PostingColumn::Id);
    }
    for (field, desc) in sort_fields {
        let column = match field.as_str() {
            "title" => PostingColumn::Title,
            "company_name" => PostingColumn::CompanyName,
            "salary" => PostingColumn::Salary,
            "application_deadline" => PostingColumn::ApplicationDeadline,
            "created_at" => PostingColumn::CreatedAt,
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
    let job_postings = paginator.fetch_page(page - 1).await.unwrap_or_default();

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            JobPostingsListResponse {
                job_postings,
                page,
                per_page,
                total,
            },
            "Job postings retrieved successfully",
        )),
    )
}

/// GET /api/job-postings/{posting_id}
///
/// Single live posting. Soft-deleted postings answer `404`.
pub async fn get_job_posting(
    State(app_state): State<AppState>,
    Path(posting_id): Path<i64>,
) -> impl IntoResponse {
    match PostingModel::find_live(app_state.db(), posting_id).await {
        Ok(Some(posting)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Some(posting),
                "Job posting retrieved successfully",
            )),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<Option<PostingModel>>::error(
                "Job posting not found",
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
