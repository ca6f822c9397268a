use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::app::AppState;
use crate::database::models::UserJson;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::user_service;

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: String,
    pub faculty: String,
    pub department: String,
}

/// GET /api/users
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<UserJson>> {
    Ok(ApiResponse::success(user_service::get_all_users_json(&state.db).await?))
}

/// GET /api/users/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<UserJson> {
    let user = user_service::get_user(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User {} not found", id)))?;
    Ok(ApiResponse::success(user.to_json()))
}

/// PUT /api/users/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> ApiResult<UserJson> {
    let user = user_service::update_user(
        &state.db,
        id,
        &payload.username,
        &payload.faculty,
        &payload.department,
    )
    .await?
    .ok_or_else(|| ApiError::not_found(format!("User {} not found", id)))?;
    Ok(ApiResponse::success(user.to_json()))
}
