//! Payment settlement adapter
//!
//! Bridges a booking to the payment gateway and guarantees capture happens
//! at most once. Settlement (payment SUCCESS + booking CONFIRMED) is a
//! single transaction guarded by conditional status updates; the signature
//! check runs before any state change and uses constant-time comparison.

use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{Booking, BookingStatus, Payment, PaymentMethod};
use shared::util;

use crate::db;
use crate::error::ServiceResult;
use crate::gateway;
use crate::notify::DomainEvent;
use crate::services::booking::recipient_of;
use crate::state::AppState;

/// Gateway order reference returned to the client to complete payment
#[derive(Debug, Clone, Serialize)]
pub struct InitiatedPayment {
    pub payment_id: i64,
    pub gateway_order_id: String,
    pub amount_minor: i64,
    pub currency: String,
    pub key_id: String,
}

/// Result of a successful capture
#[derive(Debug, Clone, Serialize)]
pub struct Settlement {
    pub booking: Booking,
    pub payment: Payment,
}

/// Create a gateway order and a PENDING payment for the booking.
///
/// Gateway failures are retryable: nothing is persisted until the gateway
/// order exists, so the client may simply call initiate again.
pub async fn initiate(
    state: &AppState,
    user_id: i64,
    booking_id: i64,
    method: PaymentMethod,
) -> ServiceResult<InitiatedPayment> {
    let booking = db::bookings::find_by_id(&state.pool, booking_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BookingNotFound))?;
    if booking.user_id != user_id {
        return Err(AppError::permission_denied("Booking belongs to another user").into());
    }
    match booking.status() {
        Some(BookingStatus::Pending) => {}
        Some(BookingStatus::Confirmed) | Some(BookingStatus::CheckedIn) => {
            return Err(AppError::already_processed().into());
        }
        _ => {
            return Err(AppError::invalid_state("Booking is not awaiting payment").into());
        }
    }
    if db::payments::find_by_booking(&state.pool, booking_id)
        .await?
        .is_some()
    {
        return Err(AppError::new(ErrorCode::PaymentAlreadyInitiated).into());
    }

    let amount_minor = gateway::to_minor_units(booking.final_amount)
        .ok_or_else(|| AppError::internal("Booking amount not representable in minor units"))?;

    let order = state
        .gateway
        .create_order(amount_minor, &state.currency, &booking.booking_number)
        .await
        .map_err(|e| {
            tracing::warn!(booking_id, error = %e, "Gateway order creation failed");
            AppError::new(ErrorCode::GatewayOrderFailed)
        })?;

    let payment_id = util::snowflake_id();
    let create = db::payments::CreatePayment {
        id: payment_id,
        booking_id,
        amount: booking.final_amount,
        currency: &state.currency,
        method: method.as_db(),
        gateway_order_id: &order.id,
        now: util::now_millis(),
    };
    // UNIQUE booking_id turns a concurrent double-initiate into zero
    // affected rows instead of a duplicate payment.
    if db::payments::insert_pending(&state.pool, &create).await? == 0 {
        return Err(AppError::new(ErrorCode::PaymentAlreadyInitiated).into());
    }

    tracing::info!(
        booking_id,
        payment_id,
        gateway_order_id = %order.id,
        amount_minor,
        "Payment initiated"
    );

    Ok(InitiatedPayment {
        payment_id,
        gateway_order_id: order.id,
        amount_minor,
        currency: state.currency.clone(),
        key_id: state.gateway.key_id().to_string(),
    })
}

/// Verify the gateway signature and capture the payment exactly once.
///
/// On success the payment flips PENDING → SUCCESS and the booking
/// PENDING → CONFIRMED in one transaction. A replay of the same call is
/// rejected with PaymentAlreadyProcessed; a bad signature mutates nothing.
pub async fn verify_and_capture(
    state: &AppState,
    user_id: i64,
    gateway_order_id: &str,
    gateway_payment_id: &str,
    signature: &str,
) -> ServiceResult<Settlement> {
    let payment = db::payments::find_by_order_id(&state.pool, gateway_order_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::PaymentNotFound))?;
    let booking = db::bookings::find_by_id(&state.pool, payment.booking_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BookingNotFound))?;
    if booking.user_id != user_id {
        return Err(AppError::permission_denied("Booking belongs to another user").into());
    }
    if payment.status != "PENDING" {
        return Err(AppError::already_processed().into());
    }

    // Security boundary: reject forged captures before touching any state.
    if let Err(reason) = state
        .gateway
        .verify_payment_signature(gateway_order_id, gateway_payment_id, signature)
    {
        tracing::warn!(
            gateway_order_id,
            booking_id = payment.booking_id,
            reason,
            "Payment signature verification failed"
        );
        return Err(AppError::invalid_signature().into());
    }

    let now = util::now_millis();
    let mut tx = state.pool.begin().await?;

    if db::payments::mark_success(&mut tx, gateway_order_id, gateway_payment_id, now).await? == 0 {
        // Lost the race against a concurrent capture of the same order
        return Err(AppError::already_processed().into());
    }
    if db::bookings::mark_confirmed(&mut tx, payment.booking_id, now).await? == 0 {
        // Booking left PENDING (e.g. cancelled while paying); roll back the
        // capture record rather than confirm a dead booking.
        return Err(AppError::invalid_state("Booking is not awaiting payment").into());
    }

    tx.commit().await?;

    tracing::info!(
        booking_id = payment.booking_id,
        gateway_order_id,
        gateway_payment_id,
        "Payment captured, booking confirmed"
    );

    let booking = db::bookings::find_by_id(&state.pool, payment.booking_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BookingNotFound))?;
    let payment = db::payments::find_by_order_id(&state.pool, gateway_order_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::PaymentNotFound))?;

    // Ticket/receipt delivery rides on the confirmation notification and
    // must never roll back a settlement that already happened at the
    // gateway — detached task, failures logged only.
    if let Ok(Some(event)) = db::events::find_by_id(&state.pool, booking.event_id).await {
        state.notifier.dispatch_detached(
            state.pool.clone(),
            recipient_of(&booking),
            DomainEvent::BookingConfirmed {
                booking_number: booking.booking_number.clone(),
                event_name: event.name,
                quantity: booking.quantity,
                final_amount: booking.final_amount,
            },
        );
    }

    Ok(Settlement { booking, payment })
}
