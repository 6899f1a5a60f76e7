//! Payment API handlers

use axum::{
    Json,
    extract::{Extension, State},
};
use serde::Deserialize;

use shared::models::PaymentMethod;

use crate::auth::UserIdentity;
use crate::error::ServiceResult;
use crate::services::payment::{self, InitiatedPayment, Settlement};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct InitiateRequest {
    pub booking_id: i64,
    pub method: PaymentMethod,
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub signature: String,
}

/// POST /api/payments/initiate — create a gateway order for a booking
pub async fn initiate(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(req): Json<InitiateRequest>,
) -> ServiceResult<Json<InitiatedPayment>> {
    let initiated =
        payment::initiate(&state, user.user_id, req.booking_id, req.method).await?;
    Ok(Json(initiated))
}

/// POST /api/payments/verify — verify the gateway signature and capture
pub async fn verify(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(req): Json<VerifyRequest>,
) -> ServiceResult<Json<Settlement>> {
    let settlement = payment::verify_and_capture(
        &state,
        user.user_id,
        &req.gateway_order_id,
        &req.gateway_payment_id,
        &req.signature,
    )
    .await?;
    Ok(Json(settlement))
}
