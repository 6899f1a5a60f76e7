//! Internal job triggers
//!
//! Thin HTTP surface over the periodic jobs so an external scheduler
//! (cron) drives them; both jobs are idempotent by construction.

use axum::{Json, extract::State};
use http::HeaderMap;

use shared::error::AppError;
use shared::util;

use crate::error::{ServiceError, ServiceResult};
use crate::services::booking;
use crate::services::reminders::{self, ReminderScanReport};
use crate::state::AppState;

fn require_jobs_token(state: &AppState, headers: &HeaderMap) -> Result<(), ServiceError> {
    let token = headers
        .get("x-jobs-token")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if token.is_empty() || token != state.jobs_token {
        return Err(AppError::permission_denied("Invalid jobs token").into());
    }
    Ok(())
}

/// POST /internal/jobs/reminders/run
pub async fn run_reminders(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ServiceResult<Json<ReminderScanReport>> {
    require_jobs_token(&state, &headers)?;
    let report = reminders::run_reminder_scan(&state, util::now_millis()).await?;
    Ok(Json(report))
}

/// POST /internal/jobs/expire-bookings/run
pub async fn run_expiry(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ServiceResult<Json<serde_json::Value>> {
    require_jobs_token(&state, &headers)?;
    let expired = booking::expire_stale_bookings(&state, util::now_millis()).await?;
    Ok(Json(serde_json::json!({ "expired": expired })))
}
