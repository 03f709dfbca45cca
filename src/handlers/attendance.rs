use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::auth::CallerId;
use crate::services::attendance::RegisterAttendanceRequest;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::success;

pub async fn register_attendance(
    State(state): State<AppState>,
    CallerId(user_id): CallerId,
    Json(payload): Json<RegisterAttendanceRequest>,
) -> Result<Response, AppError> {
    let attendance = state.attendance.register(user_id, payload).await?;

    Ok(success(attendance, "Attendance registered").into_response())
}

pub async fn list_my_attendances(
    State(state): State<AppState>,
    CallerId(user_id): CallerId,
) -> Result<Response, AppError> {
    let attendances = state.attendance.list_mine(user_id).await?;

    Ok(success(attendances, "Upcoming attendances").into_response())
}
