//! Booking transaction manager
//!
//! Creates and cancels bookings as single atomic units against the ticket
//! inventory ledger. All validation reads and the guarded reserve/release
//! writes happen inside one transaction, so no partial reservation is ever
//! observable and concurrent requests for the last unit cannot both commit.

use rust_decimal::Decimal;
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{Booking, BookingItem, EventStatus};
use shared::util;

use crate::db;
use crate::error::{ServiceError, ServiceResult};
use crate::notify::{DomainEvent, Recipient};
use crate::state::AppState;

/// One requested (ticket, quantity) line
#[derive(Debug, Clone, Deserialize)]
pub struct BookingItemInput {
    pub ticket_id: i64,
    pub quantity: i32,
}

/// Booking creation request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookingInput {
    pub attendee_name: String,
    pub attendee_email: String,
    #[serde(default)]
    pub attendee_phone: Option<String>,
    pub items: Vec<BookingItemInput>,
}

/// Booking plus its line items
#[derive(Debug, Clone, serde::Serialize)]
pub struct BookingDetail {
    pub booking: Booking,
    pub items: Vec<BookingItem>,
}

/// Create a booking in PENDING state, reserving inventory atomically.
pub async fn create_booking(
    state: &AppState,
    user_id: i64,
    event_id: i64,
    input: &CreateBookingInput,
) -> ServiceResult<BookingDetail> {
    validate_input(input)?;

    let event = db::events::find_by_id(&state.pool, event_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::EventNotFound))?;
    match event.status() {
        Some(EventStatus::Published) => {}
        Some(EventStatus::Cancelled) => return Err(AppError::new(ErrorCode::EventCancelled).into()),
        Some(EventStatus::Completed) => return Err(AppError::new(ErrorCode::EventCompleted).into()),
        _ => return Err(AppError::new(ErrorCode::EventNotPublished).into()),
    }

    let now = util::now_millis();
    let booking_id = util::snowflake_id();
    let booking_number = util::booking_number(booking_id);

    // Reserve in ticket-id order so concurrent multi-ticket bookings take
    // row locks in a consistent order
    let mut items: Vec<&BookingItemInput> = input.items.iter().collect();
    items.sort_by_key(|item| item.ticket_id);

    let mut tx = state.pool.begin().await?;

    let mut total_amount = Decimal::ZERO;
    let mut quantity_total: i32 = 0;
    let mut lines: Vec<(i64, i32, Decimal, Decimal)> = Vec::with_capacity(items.len());

    for item in items {
        let ticket = db::tickets::find_by_id(&mut tx, item.ticket_id)
            .await?
            .ok_or_else(|| {
                AppError::new(ErrorCode::TicketNotFound).with_detail("ticket_id", item.ticket_id)
            })?;

        if ticket.event_id != event_id {
            return Err(AppError::new(ErrorCode::TicketNotForEvent)
                .with_detail("ticket_id", ticket.id)
                .into());
        }
        if !ticket.is_active {
            return Err(AppError::new(ErrorCode::TicketInactive)
                .with_detail("ticket_id", ticket.id)
                .into());
        }
        if !ticket.is_on_sale(now) {
            return Err(AppError::out_of_sale_window(ticket.id).into());
        }
        if item.quantity > ticket.max_per_user {
            return Err(AppError::new(ErrorCode::MaxPerUserExceeded)
                .with_detail("ticket_id", ticket.id)
                .with_detail("max_per_user", ticket.max_per_user)
                .into());
        }
        if item.quantity > ticket.remaining() {
            return Err(AppError::inventory_exhausted(ticket.id).into());
        }

        // The guarded update is the authoritative availability check: the
        // predicate re-evaluates under the row lock, so a concurrent
        // reservation that slipped in after the read above fails here.
        if !db::tickets::reserve(&mut tx, ticket.id, item.quantity).await? {
            return Err(AppError::inventory_exhausted(ticket.id).into());
        }

        let line_total = ticket.price * Decimal::from(item.quantity);
        total_amount += line_total;
        quantity_total += item.quantity;
        lines.push((ticket.id, item.quantity, ticket.price, line_total));
    }

    let discount_amount = Decimal::ZERO;
    let final_amount = total_amount - discount_amount;

    let create = db::bookings::CreateBooking {
        id: booking_id,
        booking_number: &booking_number,
        event_id,
        user_id,
        attendee_name: &input.attendee_name,
        attendee_email: &input.attendee_email,
        attendee_phone: input.attendee_phone.as_deref(),
        quantity: quantity_total,
        total_amount,
        discount_amount,
        final_amount,
        now,
    };
    db::bookings::insert(&mut tx, &create).await?;

    for (ticket_id, quantity, unit_price, total_price) in &lines {
        db::bookings::insert_item(&mut tx, booking_id, *ticket_id, *quantity, *unit_price, *total_price)
            .await?;
    }

    tx.commit().await?;

    tracing::info!(
        booking_id,
        booking_number = %booking_number,
        event_id,
        user_id,
        quantity = quantity_total,
        "Booking created"
    );

    fetch_detail(state, booking_id).await
}

/// Read a booking with its items; only the owner may see it.
pub async fn get_booking(
    state: &AppState,
    user_id: i64,
    booking_id: i64,
) -> ServiceResult<BookingDetail> {
    let detail = fetch_detail(state, booking_id).await?;
    if detail.booking.user_id != user_id {
        return Err(AppError::permission_denied("Booking belongs to another user").into());
    }
    Ok(detail)
}

/// Cancel a booking and release its reserved inventory atomically.
pub async fn cancel_booking(
    state: &AppState,
    user_id: i64,
    booking_id: i64,
) -> ServiceResult<Booking> {
    let booking = db::bookings::find_by_id(&state.pool, booking_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BookingNotFound))?;
    if booking.user_id != user_id {
        return Err(AppError::permission_denied("Booking belongs to another user").into());
    }

    let now = util::now_millis();
    let mut tx = state.pool.begin().await?;

    if db::bookings::mark_cancelled(&mut tx, booking_id, now).await? == 0 {
        return Err(AppError::new(ErrorCode::BookingNotCancellable).into());
    }
    release_items(&mut tx, booking_id).await?;

    tx.commit().await?;

    tracing::info!(booking_id, user_id, "Booking cancelled");

    if let Ok(Some(event)) = db::events::find_by_id(&state.pool, booking.event_id).await {
        state.notifier.dispatch_detached(
            state.pool.clone(),
            recipient_of(&booking),
            DomainEvent::BookingCancelled {
                booking_number: booking.booking_number.clone(),
                event_name: event.name,
            },
        );
    }

    db::bookings::find_by_id(&state.pool, booking_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BookingNotFound).into())
}

/// Cancel PENDING bookings older than the configured TTL, releasing their
/// inventory. Safe to run repeatedly; a booking confirmed between the scan
/// and the guarded update is left alone.
pub async fn expire_stale_bookings(state: &AppState, now: i64) -> ServiceResult<u64> {
    let cutoff = now - state.booking_pending_ttl_ms;
    let stale = db::bookings::find_stale_pending(&state.pool, cutoff).await?;
    let mut expired = 0u64;

    for booking_id in stale {
        let mut tx = state.pool.begin().await?;
        if db::bookings::mark_expired(&mut tx, booking_id, now).await? == 0 {
            continue; // confirmed or cancelled since the scan
        }
        release_items(&mut tx, booking_id).await?;
        tx.commit().await?;
        expired += 1;
        tracing::info!(booking_id, "Stale pending booking expired");
    }

    Ok(expired)
}

/// Notification recipient derived from the booking's attendee contact
pub fn recipient_of(booking: &Booking) -> Recipient {
    Recipient {
        user_id: booking.user_id,
        name: booking.attendee_name.clone(),
        email: Some(booking.attendee_email.clone()),
        phone: booking.attendee_phone.clone(),
    }
}

async fn fetch_detail(state: &AppState, booking_id: i64) -> ServiceResult<BookingDetail> {
    let booking = db::bookings::find_by_id(&state.pool, booking_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BookingNotFound))?;
    let items = db::bookings::find_items(&state.pool, booking_id).await?;
    Ok(BookingDetail { booking, items })
}

async fn release_items(tx: &mut sqlx::PgConnection, booking_id: i64) -> ServiceResult<()> {
    let items = db::bookings::find_items_tx(tx, booking_id).await?;
    for item in &items {
        db::tickets::release(tx, item.ticket_id, item.quantity).await?;
    }
    Ok(())
}

fn validate_input(input: &CreateBookingInput) -> Result<(), ServiceError> {
    if input.items.is_empty() {
        return Err(AppError::new(ErrorCode::BookingEmpty).into());
    }
    if input.attendee_name.trim().is_empty() {
        return Err(AppError::validation("attendee_name is required").into());
    }
    if input.attendee_email.trim().is_empty() || !input.attendee_email.contains('@') {
        return Err(AppError::validation("attendee_email is invalid").into());
    }
    for item in &input.items {
        if item.quantity <= 0 {
            return Err(AppError::validation("item quantity must be positive")
                .with_detail("ticket_id", item.ticket_id)
                .into());
        }
    }
    let mut seen = std::collections::HashSet::new();
    for item in &input.items {
        if !seen.insert(item.ticket_id) {
            return Err(AppError::validation("duplicate ticket in items")
                .with_detail("ticket_id", item.ticket_id)
                .into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(items: Vec<BookingItemInput>) -> CreateBookingInput {
        CreateBookingInput {
            attendee_name: "Ada".into(),
            attendee_email: "ada@example.com".into(),
            attendee_phone: None,
            items,
        }
    }

    fn code_of(err: ServiceError) -> shared::error::ErrorCode {
        match err {
            ServiceError::App(e) => e.code,
            ServiceError::Db(e) => panic!("unexpected db error: {e}"),
        }
    }

    #[test]
    fn test_empty_items_rejected() {
        let err = validate_input(&input(vec![])).unwrap_err();
        assert_eq!(code_of(err), ErrorCode::BookingEmpty);
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        let err = validate_input(&input(vec![BookingItemInput {
            ticket_id: 1,
            quantity: 0,
        }]))
        .unwrap_err();
        assert_eq!(code_of(err), ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_duplicate_ticket_rejected() {
        let err = validate_input(&input(vec![
            BookingItemInput { ticket_id: 1, quantity: 1 },
            BookingItemInput { ticket_id: 1, quantity: 2 },
        ]))
        .unwrap_err();
        assert_eq!(code_of(err), ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_bad_email_rejected() {
        let mut req = input(vec![BookingItemInput { ticket_id: 1, quantity: 1 }]);
        req.attendee_email = "not-an-email".into();
        let err = validate_input(&req).unwrap_err();
        assert_eq!(code_of(err), ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_valid_input_accepted() {
        assert!(validate_input(&input(vec![
            BookingItemInput { ticket_id: 1, quantity: 2 },
            BookingItemInput { ticket_id: 2, quantity: 1 },
        ]))
        .is_ok());
    }
}
