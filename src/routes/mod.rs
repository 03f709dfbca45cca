use axum::routing::{get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::{apply_security_headers, create_cors_layer};
use crate::handlers::{
    browse_schedule, cancel_meetup, create_meetup, health_check, list_my_attendances,
    list_my_meetups, register_attendance, update_meetup,
};
use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .route("/meetups", post(create_meetup).get(list_my_meetups))
        .route("/meetups/:id", put(update_meetup).delete(cancel_meetup))
        .route(
            "/attendances",
            post(register_attendance).get(list_my_attendances),
        )
        .route("/schedule", get(browse_schedule))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    apply_security_headers(router).layer(create_cors_layer())
}
