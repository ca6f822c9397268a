use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::app::AppState;
use crate::database::models::StudentJson;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::student_service;

#[derive(Debug, Deserialize)]
pub struct CreateStudentRequest {
    #[serde(rename = "studentID")]
    pub student_id: i64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStudentRequest {
    pub name: String,
}

fn student_not_found(student_id: i64) -> ApiError {
    ApiError::not_found(format!("Student {} not found", student_id))
}

/// GET /api/students
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<StudentJson>> {
    Ok(ApiResponse::success(student_service::get_all_students_JSON(&state.db).await?))
}

/// GET /api/students/:student_id
pub async fn get(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> ApiResult<StudentJson> {
    let student = student_service::get_student(&state.db, student_id)
        .await?
        .ok_or_else(|| student_not_found(student_id))?;
    Ok(ApiResponse::success(student.to_json()))
}

/// POST /api/students
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateStudentRequest>,
) -> ApiResult<StudentJson> {
    let student =
        student_service::create_student(&state.db, payload.student_id, &payload.name).await?;
    Ok(ApiResponse::created(student.to_json()))
}

/// PUT /api/students/:student_id
pub async fn update(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
    Json(payload): Json<UpdateStudentRequest>,
) -> ApiResult<StudentJson> {
    let student = student_service::update_student(&state.db, student_id, &payload.name)
        .await?
        .ok_or_else(|| student_not_found(student_id))?;
    Ok(ApiResponse::success(student.to_json()))
}

/// DELETE /api/students/:student_id - responds with the removed record
pub async fn delete(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> ApiResult<StudentJson> {
    let student = student_service::delete_student(&state.db, student_id)
        .await?
        .ok_or_else(|| student_not_found(student_id))?;
    Ok(ApiResponse::success(student.to_json()))
}
