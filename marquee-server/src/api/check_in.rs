//! Check-in API handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
};
use serde::Deserialize;

use shared::error::AppError;
use shared::models::{CheckIn, CheckInMethod};

use crate::auth::UserIdentity;
use crate::error::{ServiceError, ServiceResult};
use crate::services::check_in::{self, BookingRef, CheckInOutcome};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    #[serde(default)]
    pub booking_id: Option<i64>,
    #[serde(default)]
    pub booking_number: Option<String>,
    pub method: CheckInMethod,
}

/// POST /api/check-in — record attendance (idempotent)
pub async fn check_in(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(req): Json<CheckInRequest>,
) -> ServiceResult<Json<CheckInOutcome>> {
    let reference = match (req.booking_id, req.booking_number) {
        (Some(id), _) => BookingRef::Id(id),
        (None, Some(number)) => BookingRef::Number(number),
        (None, None) => {
            return Err(ServiceError::from(AppError::invalid_request(
                "booking_id or booking_number is required",
            )));
        }
    };

    let outcome = check_in::check_in(&state, user.user_id, &reference, req.method).await?;
    Ok(Json(outcome))
}

/// GET /api/events/{event_id}/check-ins — staff-only listing
pub async fn list_for_event(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(event_id): Path<i64>,
) -> ServiceResult<Json<Vec<CheckIn>>> {
    let check_ins = check_in::list_check_ins(&state, user.user_id, event_id).await?;
    Ok(Json(check_ins))
}
