use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::{format_validation_errors, state::AppState};
use db::models::interview_question::{
    Column as QuestionColumn, Entity as QuestionEntity, Model as QuestionModel,
};
use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{non_empty, normalize_pagination, parse_sort};

#[derive(Debug, Deserialize, Validate)]
pub struct ListQuestionsQuery {
    #[validate(range(min = 1))]
    pub page: Option<u64>,
    #[validate(range(min = 1, max = 100))]
    pub per_page: Option<u64>,
    pub sort: Option<String>,
    pub query: Option<String>,
    pub course_id: Option<i64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, Default)]
pub struct QuestionsListResponse {
    pub interview_questions: Vec<QuestionModel>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

/// GET /api/interview-questions
///
/// Paginated question list. Non-admin callers only see active questions and
/// the `is_active` filter is ignored for them.
///
/// ### Query Parameters
/// - `page` / `per_page`: pagination (defaults 1 / 20, per_page max 100)
/// - `query`: substring match on question text
/// - `course_id`: questions for one course
/// - `is_active`: admin-only flag filter
/// - `sort`: comma-separated fields (`question`, `created_at`), `-` prefix
///   for descending
pub async fn list_interview_questions(
    State(app_state): State<AppState>,
    user: Option<AuthUser>,
    Query(query): Query<ListQuestionsQuery>,
) -> impl IntoResponse {
    if let Err(e) = query.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<QuestionsListResponse>::error(
                format_validation_errors(&e),
            )),
        );
    }

    let db = app_state.db();
    let (page, per_page) = normalize_pagination(query.page, query.per_page);
    let is_admin = user.map(|AuthUser(c)| c.admin).unwrap_or(false);

    let mut condition = Condition::all();

    if is_admin {
        if let Some(is_active) = query.is_active {
            condition = condition.add(QuestionColumn::IsActive.eq(is_active));
        }
    } else {
        condition = condition.add(QuestionColumn::IsActive.eq(true));
    }

    if let Some(q) = non_empty(query.query) {
        condition = condition.add(QuestionColumn::Question.contains(&q));
    }
    if let Some(course_id) = query.course_id {
        condition = condition.add(QuestionColumn::CourseId.eq(course_id));
    }

    let mut query_builder = QuestionEntity::find().filter(condition);

    let sort_fields = parse_sort(query.sort.as_deref());
    if sort_fields.is_empty() {
        query_builder = query_builder.order_by_asc(QuestionColumn::Id);
    }
    for (field, desc) in sort_fields {
        let column = match field.as_str() {
            "question" => QuestionColumn::Question,
            "created_at" => QuestionColumn::CreatedAt,
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
    let interview_questions = paginator.fetch_page(page - 1).await.unwrap_or_default();

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            QuestionsListResponse {
                interview_questions,
                page,
                per_page,
                total,
            },
            "Interview questions retrieved successfully",
        )),
    )
}

/// GET /api/interview-questions/{question_id}
///
/// Single question. Inactive questions answer `404` for non-admins.
pub async fn get_interview_question(
    State(app_state): State<AppState>,
    user: Option<AuthUser>,
    Path(question_id): Path<i64>,
) -> impl IntoResponse {
    let is_admin = user.map(|AuthUser(c)| c.admin).unwrap_or(false);

    match QuestionEntity::find_by_id(question_id)
        .one(app_state.db())
        .await
    {
        Ok(Some(question)) => {
            if !is_admin && !question.is_active {
                return (
                    StatusCode::NOT_FOUND,
                    Json(ApiResponse::<Option<QuestionModel>>::error(
                        "Interview question not found",
                    )),
                );
            }
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    Some(question),
                    "Interview question retrieved successfully",
                )),
            )
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<Option<QuestionModel>>::error(
                "Interview question not found",
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
