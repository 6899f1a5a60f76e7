//! Scheduled reminder fan-out
//!
//! Stateless query-and-dispatch job: selects published events whose
//! reminder window has opened and fans out to their confirmed/checked-in
//! bookings. Each send is keyed on (event, booking, window kind) and
//! claimed before delivery, so overlapping scans, reruns, and restarts
//! cannot double-send.

use serde::Serialize;

use crate::db;
use crate::error::ServiceResult;
use crate::notify::{DomainEvent, ReminderWindow};
use crate::services::booking::recipient_of;
use crate::state::AppState;

/// Summary returned to the invoking scheduler
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ReminderScanReport {
    /// Events whose window was open at scan time
    pub events_considered: u64,
    /// Reminders newly claimed and dispatched by this run
    pub dispatched: u64,
}

/// Run one reminder scan at `now` (epoch millis).
pub async fn run_reminder_scan(state: &AppState, now: i64) -> ServiceResult<ReminderScanReport> {
    let mut report = ReminderScanReport::default();

    for window in ReminderWindow::ALL {
        let events =
            db::events::find_published_starting_between(&state.pool, now, now + window.offset_ms())
                .await?;

        for event in events {
            report.events_considered += 1;
            let window_start = event.start_at - window.offset_ms();
            let attendees = db::bookings::find_attendees_for_event(&state.pool, event.id).await?;

            for booking in attendees {
                let claimed = db::reminders::claim(
                    &state.pool,
                    event.id,
                    booking.id,
                    window.as_db(),
                    window_start,
                    now,
                )
                .await?;
                if !claimed {
                    continue;
                }

                state
                    .notifier
                    .dispatch(
                        &state.pool,
                        &recipient_of(&booking),
                        &DomainEvent::EventReminder {
                            event_name: event.name.clone(),
                            venue: event.venue.clone(),
                            start_at: event.start_at,
                            window,
                        },
                    )
                    .await;
                report.dispatched += 1;
            }
        }
    }

    if report.dispatched > 0 {
        tracing::info!(
            events = report.events_considered,
            dispatched = report.dispatched,
            "Reminder scan dispatched"
        );
    }

    Ok(report)
}
