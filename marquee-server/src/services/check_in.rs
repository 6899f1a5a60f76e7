//! Check-in service
//!
//! Records attendance exactly once per booking. Idempotence is structural:
//! the guarded CONFIRMED → CHECKED_IN transition decides the winner, and a
//! booking already checked in returns the existing record instead of an
//! error or a duplicate row.

use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{Booking, BookingStatus, CheckIn, CheckInMethod, EventRole};
use shared::util;

use crate::db;
use crate::error::ServiceResult;
use crate::state::AppState;

/// Booking lookup key accepted at the gate
#[derive(Debug, Clone)]
pub enum BookingRef {
    Id(i64),
    Number(String),
}

/// Check-in result with the booking snapshot
#[derive(Debug, Clone, Serialize)]
pub struct CheckInOutcome {
    pub check_in: CheckIn,
    pub booking: Booking,
    pub already_checked_in: bool,
}

/// Record attendance for a booking. Caller must hold an operational role
/// (organizer/manager/volunteer) on the booking's event.
pub async fn check_in(
    state: &AppState,
    staff_user_id: i64,
    reference: &BookingRef,
    method: CheckInMethod,
) -> ServiceResult<CheckInOutcome> {
    let booking = resolve(state, reference).await?;

    require_operational_role(state, staff_user_id, booking.event_id).await?;

    let now = util::now_millis();
    let mut tx = state.pool.begin().await?;

    if db::bookings::mark_checked_in(&mut tx, booking.id, now).await? == 1 {
        let create = db::check_ins::CreateCheckIn {
            id: util::snowflake_id(),
            booking_id: booking.id,
            method: method.as_db(),
            checked_in_by: staff_user_id,
            now,
        };
        db::check_ins::insert(&mut tx, &create).await?;
        tx.commit().await?;

        tracing::info!(
            booking_id = booking.id,
            staff_user_id,
            method = method.as_db(),
            "Attendee checked in"
        );

        let booking = refetch(state, booking.id).await?;
        let check_in = db::check_ins::find_by_booking(&state.pool, booking.id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::CheckInNotFound))?;
        return Ok(CheckInOutcome {
            check_in,
            booking,
            already_checked_in: false,
        });
    }
    drop(tx);

    // Transition did not apply: either already checked in (normal, return
    // the existing record) or the booking is in a state that cannot check
    // in at all.
    let booking = refetch(state, booking.id).await?;
    match booking.status() {
        Some(BookingStatus::CheckedIn) => {
            let check_in = db::check_ins::find_by_booking(&state.pool, booking.id)
                .await?
                .ok_or_else(|| AppError::new(ErrorCode::CheckInNotFound))?;
            Ok(CheckInOutcome {
                check_in,
                booking,
                already_checked_in: true,
            })
        }
        Some(BookingStatus::Pending) => {
            Err(AppError::invalid_state("Booking has not completed payment").into())
        }
        Some(BookingStatus::Cancelled) => {
            Err(AppError::invalid_state("Booking has been cancelled").into())
        }
        _ => Err(AppError::invalid_state("Booking cannot be checked in").into()),
    }
}

/// Staff-only listing of an event's check-ins
pub async fn list_check_ins(
    state: &AppState,
    staff_user_id: i64,
    event_id: i64,
) -> ServiceResult<Vec<CheckIn>> {
    if db::events::find_by_id(&state.pool, event_id).await?.is_none() {
        return Err(AppError::new(ErrorCode::EventNotFound).into());
    }
    require_operational_role(state, staff_user_id, event_id).await?;
    Ok(db::check_ins::list_for_event(&state.pool, event_id).await?)
}

async fn require_operational_role(
    state: &AppState,
    user_id: i64,
    event_id: i64,
) -> ServiceResult<()> {
    let allowed =
        db::event_roles::has_any_role(&state.pool, user_id, event_id, &EventRole::OPERATIONAL)
            .await?;
    if !allowed {
        return Err(AppError::new(ErrorCode::RoleRequired)
            .with_detail("event_id", event_id)
            .into());
    }
    Ok(())
}

async fn resolve(state: &AppState, reference: &BookingRef) -> ServiceResult<Booking> {
    let booking = match reference {
        BookingRef::Id(id) => db::bookings::find_by_id(&state.pool, *id).await?,
        BookingRef::Number(number) => db::bookings::find_by_number(&state.pool, number).await?,
    };
    booking.ok_or_else(|| AppError::new(ErrorCode::BookingNotFound).into())
}

async fn refetch(state: &AppState, booking_id: i64) -> ServiceResult<Booking> {
    db::bookings::find_by_id(&state.pool, booking_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BookingNotFound).into())
}
