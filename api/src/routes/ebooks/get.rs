use axum::{
    Json,
    body::Body,
    extract::{Path, Query, State},
    http::{Response, StatusCode},
    response::IntoResponse,
};
use common::{format_validation_errors, state::AppState};
use db::models::ebook::{Column as EbookColumn, Entity as EbookEntity, Model as EbookModel};
use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use validator::Validate;

use crate::response::ApiResponse;
use crate::routes::common::{non_empty, normalize_pagination, parse_sort};

#[derive(Debug, Deserialize, Validate)]
pub struct ListEbooksQuery {
    #[validate(range(min = 1))]
    pub page: Option<u64>,
    #[validate(range(min = 1, max = 100))]
    pub per_page: Option<u64>,
    pub sort: Option<String>,
    pub query: Option<String>,
    pub course_id: Option<i64>,
}

#[derive(Debug, Serialize, Default)]
pub struct EbooksListResponse {
    pub ebooks: Vec<EbookModel>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

/// GET /api/ebooks
///
/// Paginated ebook catalog.
///
/// ### Query Parameters
/// - `page` / `per_page`: pagination (defaults 1 / 20, per_page max 100)
/// - `query`: substring match on title
/// - `course_id`: ebooks for one course
/// - `sort`: comma-separated fields (`title`, `created_at`), `-` prefix for
///   descending
pub async fn list_ebooks(
    State(app_state): State<AppState>,
    Query(query): Query<ListEbooksQuery>,
) -> impl IntoResponse {
    if let Err(e) = query.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<EbooksListResponse>::error(
                format_validation_errors(&e),
            )),
        );
    }

    let db = app_state.db();
    let (page, per_page) = normalize_pagination(query.page, query.per_page);

    let mut condition = Condition::all();

    if let Some(q) = non_empty(query.query) {
        condition = condition.add(EbookColumn::Title.contains(&q));
    }
    if let Some(course_id) = query.course_id {
        condition = condition.add(EbookColumn::CourseId.eq(course_id));
    }

    let mut query_builder = EbookEntity::find().filter(condition);

    let sort_fields = parse_sort(query.sort.as_deref());
    if sort_fields.is_empty() {
        query_builder = query_builder.order_by_asc(EbookColumn::Id);
    }
    for (field, desc) in sort_fields {
        let column = match field.as_str() {
            "title" => EbookColumn::Title,
            "created_at" => EbookColumn::CreatedAt,
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
    let ebooks = paginator.fetch_page(page - 1).await.unwrap_or_default();

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            EbooksListResponse {
                ebooks,
                page,
                per_page,
                total,
            },
            "Ebooks retrieved successfully",
        )),
    )
}

/// GET /api/ebooks/{ebook_id}/download
///
/// Streams the stored file with its recorded MIME type and an attachment
/// `Content-Disposition`. Answers `404` if the row or the file is gone.
pub async fn download_ebook(
    State(app_state): State<AppState>,
    Path(ebook_id): Path<i64>,
) -> axum::response::Response {
    let ebook = match EbookEntity::find_by_id(ebook_id).one(app_state.db()).await {
        Ok(Some(ebook)) => ebook,
        Ok(None) => return StatusCode::NOT_FOUND.into_response(),
        Err(_) => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    };

    let file = match File::open(&ebook.file_path).await {
        Ok(f) => f,
        Err(_) => return StatusCode::NOT_FOUND.into_response(),
    };

    let ext = std::path::Path::new(&ebook.file_path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("bin");
    let filename = format!("{}.{}", ebook.title.replace('/', "_"), ext);

    let stream = ReaderStream::new(file);
    let body = Body::from_stream(stream);

    Response::builder()
        .header("Content-Type", ebook.mime_type)
        .header(
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", filename),
        )
        .body(body)
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
