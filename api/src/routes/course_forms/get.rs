use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::{format_validation_errors, state::AppState};
use db::models::course_form::{
    Column as FormColumn, Entity as FormEntity, FormStatus, Model as FormModel,
};
use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use validator::Validate;

use crate::response::ApiResponse;
use crate::routes::common::{non_empty, normalize_pagination, parse_sort};

#[derive(Debug, Deserialize, Validate)]
pub struct ListCourseFormsQuery {
    #[validate(range(min = 1))]
    pub page: Option<u64>,
    #[validate(range(min = 1, max = 100))]
    pub per_page: Option<u64>,
    pub sort: Option<String>,
    pub query: Option<String>,
    pub status: Option<String>,
    pub course_id: Option<i64>,
}

#[derive(Debug, Serialize, Default)]
pub struct CourseFormsListResponse {
    pub course_forms: Vec<FormModel>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

/// GET /api/course-forms
///
/// Paginated pipeline view. Admin only.
///
/// ### Query Parameters
/// - `page` / `per_page`: pagination (defaults 1 / 20, per_page max 100)
/// - `query`: substring match against name, email OR mobile
/// - `status`: workflow state filter
/// - `course_id`: forms for one course
/// - `sort`: comma-separated fields (`name`, `email`, `created_at`), `-`
///   prefix for descending
pub async fn list_course_forms(
    State(app_state): State<AppState>,
    Query(query): Query<ListCourseFormsQuery>,
) -> impl IntoResponse {
    if let Err(e) = query.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<CourseFormsListResponse>::error(
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
                .add(FormColumn::Name.contains(&q))
                .add(FormColumn::Email.contains(&q))
                .add(FormColumn::Mobile.contains(&q)),
        );
    }
    if let Some(status) = non_empty(query.status) {
        match FormStatus::from_str(&status) {
            Ok(s) => condition = condition.add(FormColumn::Status.eq(s)),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<CourseFormsListResponse>::error(
                        "Invalid status filter",
                    )),
                );
            }
        }
    }
    if let Some(course_id) = query.course_id {
        condition = condition.add(FormColumn::CourseId.eq(course_id));
    }

    let mut query_builder = FormEntity::find().filter(condition);

    let sort_fields = parse_sort(query.sort.as_deref());
    if sort_fields.is_empty() {
        query_builder = query_builder.order_by_asc(FormColumn::Id);
    }
    for (field, desc) in sort_fields {
        let column = match field.as_str() {
            "name" => FormColumn::Name,
            "email" => FormColumn::Email,
            "created_at" => FormColumn::CreatedAt,
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
    let course_forms = paginator.fetch_page(page - 1).await.unwrap_or_default();

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            CourseFormsListResponse {
                course_forms,
                page,
                per_page,
                total,
            },
            "Course forms retrieved successfully",
        )),
    )
}

/// GET /api/course-forms/{form_id}
///
/// Single form. Admin only.
pub async fn get_course_form(
    State(app_state): State<AppState>,
    Path(form_id): Path<i64>,
) -> impl IntoResponse {
    match FormEntity::find_by_id(form_id).one(app_state.db()).await {
        Ok(Some(form)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Some(form),
                "Course form retrieved successfully",
            )),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<Option<FormModel>>::error(
                "Course form not found",
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
