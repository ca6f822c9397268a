use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::auth::{generate_jwt, Claims};
use crate::database::models::UserJson;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::user_service;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub faculty: String,
    #[serde(default)]
    pub department: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub faculty: String,
    pub department: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserJson,
    /// Seconds until the token expires
    pub expires_in: i64,
}

/// POST /auth/login - Verify credentials and receive a JWT
///
/// Expected Input:
/// ```json
/// { "username": "bob", "password": "bobpass", "faculty": "FST", "department": "DCIT" }
/// ```
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let user = user_service::authenticate(
        &state.db,
        &payload.username,
        &payload.password,
        &payload.faculty,
        &payload.department,
    )
    .await?
    .ok_or_else(|| ApiError::unauthorized("Invalid username or password"))?;

    let user_id = user
        .id
        .ok_or_else(|| ApiError::internal_server_error("Stored user has no id"))?;
    let claims = Claims::new(user_id, user.username.clone())?;
    let token = generate_jwt(&claims)?;

    tracing::info!("User {} logged in", user.username);
    Ok(ApiResponse::success(LoginResponse {
        token,
        user: user.to_json(),
        expires_in: claims.lifetime_secs(),
    }))
}

/// POST /auth/signup - Create an account
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> ApiResult<UserJson> {
    if payload.username.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::bad_request("username and password are required"));
    }

    let user = user_service::create_user(
        &state.db,
        &payload.username,
        &payload.password,
        &payload.faculty,
        &payload.department,
    )
    .await?;

    Ok(ApiResponse::created(user.to_json()))
}

/// GET /api/identify - The account behind the presented token
pub async fn identify(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<UserJson> {
    let user = user_service::get_user(&state.db, auth_user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User {} not found", auth_user.user_id)))?;

    Ok(ApiResponse::success(user.to_json()))
}
