use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

use super::auth::CallerId;
use crate::services::meetups::{CreateMeetupRequest, UpdateMeetupRequest};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{empty_success, success};

pub async fn create_meetup(
    State(state): State<AppState>,
    CallerId(organizer_id): CallerId,
    Json(payload): Json<CreateMeetupRequest>,
) -> Result<Response, AppError> {
    let meetup = state.meetups.create(organizer_id, payload).await?;

    Ok(success(meetup, "Meetup created").into_response())
}

pub async fn update_meetup(
    State(state): State<AppState>,
    CallerId(organizer_id): CallerId,
    Path(meetup_id): Path<Uuid>,
    Json(payload): Json<UpdateMeetupRequest>,
) -> Result<Response, AppError> {
    let meetup = state.meetups.update(organizer_id, meetup_id, payload).await?;

    Ok(success(meetup, "Meetup updated").into_response())
}

pub async fn list_my_meetups(
    State(state): State<AppState>,
    CallerId(organizer_id): CallerId,
) -> Result<Response, AppError> {
    let meetups = state.meetups.list(organizer_id).await?;

    Ok(success(meetups, "Upcoming meetups").into_response())
}

pub async fn cancel_meetup(
    State(state): State<AppState>,
    CallerId(organizer_id): CallerId,
    Path(meetup_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let message = state.meetups.cancel(organizer_id, meetup_id).await?;

    Ok(empty_success(message).into_response())
}
