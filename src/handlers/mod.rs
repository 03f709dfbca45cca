use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::utils::response::success;

pub mod attendance;
pub mod auth;
pub mod meetups;
pub mod schedule;

pub use attendance::{list_my_attendances, register_attendance};
pub use auth::CallerId;
pub use meetups::{cancel_meetup, create_meetup, list_my_meetups, update_meetup};
pub use schedule::browse_schedule;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "gather-api",
    };

    success(payload, "Health check successful").into_response()
}
