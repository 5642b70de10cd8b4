use axum::{
    Json,
    body::Body,
    extract::{Path, Query, State},
    http::{Response, StatusCode},
    response::IntoResponse,
};
use common::{format_validation_errors, state::AppState};
use db::models::course::{
    Column as CourseColumn, Entity as CourseEntity, Model as CourseModel, ModerationStatus,
    Visibility,
};
use mime_guess::from_path;
use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use validator::Validate;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{non_empty, normalize_pagination, parse_sort};

#[derive(Debug, Deserialize, Validate)]
pub struct ListCoursesQuery {
    #[validate(range(min = 1))]
    pub page: Option<u64>,
    #[validate(range(min = 1, max = 100))]
    pub per_page: Option<u64>,
    pub sort: Option<String>,
    pub query: Option<String>,
    pub category: Option<String>,
    pub visibility: Option<String>,
    pub moderation_status: Option<String>,
    pub is_free: Option<bool>,
    pub is_featured: Option<bool>,
}

#[derive(Debug, Serialize, Default)]
pub struct CoursesListResponse {
    pub courses: Vec<CourseModel>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

/// GET /api/courses
///
/// Paginated course catalog with optional filtering and sorting.
///
/// Anonymous and non-admin callers only see public, approved courses; the
/// `visibility` and `moderation_status` filters are admin-only and are
/// ignored otherwise. Empty filter values are treated as absent.
///
/// ### Query Parameters
/// - `page` / `per_page`: pagination (defaults 1 / 20, per_page max 100)
/// - `query`: substring match against title OR description
/// - `category`: substring match on category
/// - `is_free`, `is_featured`: boolean filters
/// - `visibility`, `moderation_status`: admin-only enum filters
/// - `sort`: comma-separated fields (`title`, `price`, `category`,
///   `created_at`), `-` prefix for descending
pub async fn list_courses(
    State(app_state): State<AppState>,
    user: Option<AuthUser>,
    Query(query): Query<ListCoursesQuery>,
) -> impl IntoResponse {
    if let Err(e) = query.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<CoursesListResponse>::error(
                format_validation_errors(&e),
            )),
        );
    }

    let db = app_state.db();
    let (page, per_page) = normalize_pagination(query.page, query.per_page);
    let is_admin = user.map(|AuthUser(c)| c.admin).unwrap_or(false);

    let mut condition = Condition::all();

    if is_admin {
        if let Some(vis) = non_empty(query.visibility) {
            match Visibility::from_str(&vis) {
                Ok(v) => condition = condition.add(CourseColumn::Visibility.eq(v)),
                Err(_) => {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(ApiResponse::<CoursesListResponse>::error(
                            "Invalid visibility filter",
                        )),
                    );
                }
            }
        }
        if let Some(status) = non_empty(query.moderation_status) {
            match ModerationStatus::from_str(&status) {
                Ok(s) => condition = condition.add(CourseColumn::ModerationStatus.eq(s)),
                Err(_) => {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(ApiResponse::<CoursesListResponse>::error(
                            "Invalid moderation_status filter",
                        )),
                    );
                }
            }
        }
    } else {
        condition = condition
            .add(CourseColumn::Visibility.eq(Visibility::Public))
            .add(CourseColumn::ModerationStatus.eq(ModerationStatus::Approved));
    }

    if let Some(q) = non_empty(query.query) {
        condition = condition.add(
            Condition::any()
                .add(CourseColumn::Title.contains(&q))
                .add(CourseColumn::Description.contains(&q)),
        );
    }
    if let Some(category) = non_empty(query.category) {
        condition = condition.add(CourseColumn::Category.contains(&category));
    }
    if let Some(is_free) = query.is_free {
        condition = condition.add(CourseColumn::IsFree.eq(is_free));
    }
    if let Some(is_featured) = query.is_featured {
        condition = condition.add(CourseColumn::IsFeatured.eq(is_featured));
    }

    let mut query_builder = CourseEntity::find().filter(condition);

    let sort_fields = parse_sort(query.sort.as_deref());
    if sort_fields.is_empty() {
        query_builder = query_builder.order_by_asc(CourseColumn::Id);
    }
    for (field, desc) in sort_fields {
        let column = match field.as_str() {
            "title" => CourseColumn::Title,
            "price" => CourseColumn::Price,
            "category" => CourseColumn::Category,
            "created_at" => CourseColumn::CreatedAt,
            _ => continue,
        };
        query_builder = if desc {
            query_builder.order_by_desc(column)
        } else {
            query_builder.order_by_asc(column)
        };
    }

    let paginator = query_builder.paginate(db, per_page);
    let total = match paginator.num_items().await {
        Ok(total) => total,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<CoursesListResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };
    let courses = paginator.fetch_page(page - 1).await.unwrap_or_default();

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            CoursesListResponse {
                courses,
                page,
                per_page,
                total,
            },
            "Courses retrieved successfully",
        )),
    )
}

/// GET /api/courses/{course_id}
///
/// Single course. Hidden or unapproved courses are only visible to admins
/// and answer `404` otherwise.
pub async fn get_course(
    State(app_state): State<AppState>,
    user: Option<AuthUser>,
    Path(course_id): Path<i64>,
) -> impl IntoResponse {
    let is_admin = user.map(|AuthUser(c)| c.admin).unwrap_or(false);

    match CourseEntity::find_by_id(course_id).one(app_state.db()).await {
        Ok(Some(course)) => {
            let publicly_visible = course.visibility == Visibility::Public
                && course.moderation_status == ModerationStatus::Approved;
            if !is_admin && !publicly_visible {
                return (
                    StatusCode::NOT_FOUND,
                    Json(ApiResponse::<Option<CourseModel>>::error("Course not found")),
                );
            }
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    Some(course),
                    "Course retrieved successfully",
                )),
            )
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<Option<CourseModel>>::error("Course not found")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Option<CourseModel>>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}

/// GET /api/courses/{course_id}/thumbnail
///
/// Streams the stored thumbnail image, if any. Visibility follows the course:
/// hidden or unapproved courses answer `404` for non-admins.
pub async fn get_course_thumbnail(
    State(app_state): State<AppState>,
    user: Option<AuthUser>,
    Path(course_id): Path<i64>,
) -> axum::response::Response {
    let is_admin = user.map(|AuthUser(c)| c.admin).unwrap_or(false);

    let course = match CourseEntity::find_by_id(course_id).one(app_state.db()).await {
        Ok(Some(course)) => course,
        Ok(None) => return StatusCode::NOT_FOUND.into_response(),
        Err(_) => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    };

    let publicly_visible = course.visibility == Visibility::Public
        && course.moderation_status == ModerationStatus::Approved;
    if !is_admin && !publicly_visible {
        return StatusCode::NOT_FOUND.into_response();
    }

    let Some(path) = course.thumbnail_path else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let file = match File::open(&path).await {
        Ok(f) => f,
        Err(_) => return StatusCode::NOT_FOUND.into_response(),
    };

    let mime = from_path(&path).first_or_octet_stream();
    let stream = ReaderStream::new(file);
    let body = Body::from_stream(stream);

    Response::builder()
        .header("Content-Type", mime.as_ref())
        .body(body)
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
