use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::app::AppState;
use crate::database::models::{Review, ReviewJson};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::review_service;

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    #[serde(rename = "studentID")]
    pub student_id: i64,
    pub experience: String,
    pub rating: i64,
}

#[derive(Debug, Deserialize)]
pub struct ExperienceRequest {
    pub experience: String,
}

#[derive(Debug, Deserialize)]
pub struct RatingRequest {
    pub rating: i64,
}

fn found(id: i64, review: Option<Review>) -> ApiResult<ReviewJson> {
    review
        .map(|r| ApiResponse::success(r.to_json()))
        .ok_or_else(|| ApiError::not_found(format!("Review {} not found", id)))
}

/// GET /api/reviews
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<ReviewJson>> {
    Ok(ApiResponse::success(review_service::get_all_reviews_json(&state.db).await?))
}

/// GET /api/reviews/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<ReviewJson> {
    found(id, review_service::get_review(&state.db, id).await?)
}

/// POST /api/reviews - the caller is recorded as the reviewing staff member
pub async fn create(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<CreateReviewRequest>,
) -> ApiResult<ReviewJson> {
    let review = review_service::create_review(
        &state.db,
        payload.student_id,
        auth_user.user_id,
        &payload.experience,
        payload.rating,
    )
    .await?;
    Ok(ApiResponse::created(review.to_json()))
}

/// PUT /api/reviews/:id/experience
pub async fn update_experience(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ExperienceRequest>,
) -> ApiResult<ReviewJson> {
    found(id, review_service::update_review_exp(&state.db, id, &payload.experience).await?)
}

/// PUT /api/reviews/:id/rating
pub async fn update_rating(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<RatingRequest>,
) -> ApiResult<ReviewJson> {
    found(id, review_service::update_review_rate(&state.db, id, payload.rating).await?)
}

/// POST /api/reviews/:id/upvote
pub async fn upvote(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<ReviewJson> {
    found(id, review_service::upvote(&state.db, id).await?)
}

/// POST /api/reviews/:id/downvote
pub async fn downvote(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<ReviewJson> {
    found(id, review_service::downvote(&state.db, id).await?)
}

/// DELETE /api/reviews/:id - responds with the removed record
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<ReviewJson> {
    found(id, review_service::delete_review(&state.db, id).await?)
}
