use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use common::{format_validation_errors, state::AppState};
use db::models::user::{ActiveModel as UserActiveModel, Entity as UserEntity, Model as UserModel};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait};
use serde::Deserialize;
use validator::Validate;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::auth::get::ProfileResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 3, max = 64, message = "Username must be 3-64 characters"))]
    pub username: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

/// PUT /api/auth/profile
///
/// Updates the caller's username and/or email.
///
/// ### Responses
/// - `200 OK` with the updated profile
/// - `400 Bad Request` on validation failure
/// - `409 Conflict` if the username or email is taken
pub async fn update_profile(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<ProfileResponse>::error(
                format_validation_errors(&validation_errors),
            )),
        );
    }

    let db = app_state.db();
    let user = match UserEntity::find_by_id(claims.sub).one(db).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<ProfileResponse>::error("User not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ProfileResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    if let Some(username) = &req.username {
        if let Ok(Some(existing)) = UserModel::find_by_username(db, username).await {
            if existing.id != user.id {
                return (
                    StatusCode::CONFLICT,
                    Json(ApiResponse::<ProfileResponse>::error(
                        "A user with this username already exists",
                    )),
                );
            }
        }
    }

    if let Some(email) = &req.email {
        if let Ok(Some(existing)) = UserModel::find_by_email(db, email).await {
            if existing.id != user.id {
                return (
                    StatusCode::CONFLICT,
                    Json(ApiResponse::<ProfileResponse>::error(
                        "A user with this email already exists",
                    )),
                );
            }
        }
    }

    let mut active: UserActiveModel = user.into();
    if let Some(username) = req.username {
        active.username = Set(username);
    }
    if let Some(email) = req.email {
        active.email = Set(email.to_lowercase());
    }
    active.updated_at = Set(Utc::now());

    match active.update(db).await {
        Ok(updated) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                ProfileResponse::from(updated),
                "Profile updated successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<ProfileResponse>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}
