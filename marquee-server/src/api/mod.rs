//! API routes for marquee-server

pub mod bookings;
pub mod check_in;
pub mod health;
pub mod jobs;
pub mod payments;

use axum::routing::{get, post};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::user_auth_middleware;
use crate::state::AppState;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // User API (JWT authenticated)
    let user_api = Router::new()
        .route("/api/events/{event_id}/bookings", post(bookings::create))
        .route("/api/bookings/{id}", get(bookings::get_by_id))
        .route("/api/bookings/{id}/cancel", post(bookings::cancel))
        .route("/api/payments/initiate", post(payments::initiate))
        .route("/api/payments/verify", post(payments::verify))
        .route("/api/check-in", post(check_in::check_in))
        .route(
            "/api/events/{event_id}/check-ins",
            get(check_in::list_for_event),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            user_auth_middleware,
        ));

    // Internal jobs (shared-token authenticated, invoked by cron)
    let jobs = Router::new()
        .route("/internal/jobs/reminders/run", post(jobs::run_reminders))
        .route(
            "/internal/jobs/expire-bookings/run",
            post(jobs::run_expiry),
        );

    Router::new()
        .route("/health", get(health::health_check))
        .merge(user_api)
        .merge(jobs)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
