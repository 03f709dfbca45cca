use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};

use crate::services::schedule::ScheduleParams;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::success;

/// Public listing; no caller identity required.
pub async fn browse_schedule(
    State(state): State<AppState>,
    Query(params): Query<ScheduleParams>,
) -> Result<Response, AppError> {
    let page = state.schedule.browse(params).await?;

    Ok(success(page, "Schedule").into_response())
}
