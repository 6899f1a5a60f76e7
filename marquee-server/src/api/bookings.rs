//! Booking API handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
};
use http::StatusCode;

use shared::models::Booking;

use crate::auth::UserIdentity;
use crate::error::ServiceResult;
use crate::services::booking::{self, BookingDetail, CreateBookingInput};
use crate::state::AppState;

/// POST /api/events/{event_id}/bookings — reserve inventory and create a
/// PENDING booking
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(event_id): Path<i64>,
    Json(input): Json<CreateBookingInput>,
) -> ServiceResult<(StatusCode, Json<BookingDetail>)> {
    let detail = booking::create_booking(&state, user.user_id, event_id, &input).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET /api/bookings/{id} — owner-only booking read
pub async fn get_by_id(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<i64>,
) -> ServiceResult<Json<BookingDetail>> {
    let detail = booking::get_booking(&state, user.user_id, id).await?;
    Ok(Json(detail))
}

/// POST /api/bookings/{id}/cancel — cancel and release inventory
pub async fn cancel(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<i64>,
) -> ServiceResult<Json<Booking>> {
    let booking = booking::cancel_booking(&state, user.user_id, id).await?;
    Ok(Json(booking))
}
