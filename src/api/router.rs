use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, cancel_rental, create_rental, create_toestel, delete_toestel, get_availability,
    get_toestel, list_renter_rentals, list_toestel_rentals, list_toestellen, update_availability,
    update_toestel,
};

/// Creates the API router with all toestel and rental endpoints
///
/// Toestel endpoints:
/// - POST /toestellen - Register a toestel
/// - GET /toestellen - Search listings (`q`, `category`, `owner_id`)
/// - GET /toestellen/:id - Get listing details
/// - PUT /toestellen/:id - Edit a listing
/// - DELETE /toestellen/:id - Remove a listing and its rentals
/// - PUT /toestellen/:id/availability - Change the availability window
/// - GET /toestellen/:id/availability - Check a period (`start`, `end`)
///
/// Rental endpoints:
/// - POST /toestellen/:id/rentals - Book a period
/// - GET /toestellen/:id/rentals - Rentals of a toestel
/// - GET /rentals - Rentals of a renter (`renter_id`)
/// - DELETE /rentals/:id - Cancel a rental
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .route("/toestellen", post(create_toestel).get(list_toestellen))
        .route(
            "/toestellen/:id",
            get(get_toestel).put(update_toestel).delete(delete_toestel),
        )
        .route(
            "/toestellen/:id/availability",
            get(get_availability).put(update_availability),
        )
        .route(
            "/toestellen/:id/rentals",
            post(create_rental).get(list_toestel_rentals),
        )
        .route("/rentals", get(list_renter_rentals))
        .route("/rentals/:id", delete(cancel_rental))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
