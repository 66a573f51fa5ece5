use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, cancel_reservation, create_reservation, get_reservation, get_room_availability,
    list_available_rooms,
};

/// Creates the API router with all room booking endpoints
///
/// Command endpoints (Write operations):
/// - POST /reservations - Make a reservation
/// - DELETE /reservations/:id - Cancel a reservation
///
/// Query endpoints (Read operations):
/// - GET /rooms - Available rooms for a date range (paginated)
/// - GET /rooms/:id/availability - Availability of a single room
/// - GET /reservations/:id - Reservation details
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .route("/rooms", get(list_available_rooms))
        .route("/rooms/:id/availability", get(get_room_availability))
        .route("/reservations", post(create_reservation))
        .route(
            "/reservations/:id",
            get(get_reservation).delete(cancel_reservation),
        )
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
