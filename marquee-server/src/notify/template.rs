//! Notification templates keyed by domain event kind

use super::{DomainEvent, NotificationContent};

/// Render the title/body for a domain event
pub fn render(event: &DomainEvent) -> NotificationContent {
    match event {
        DomainEvent::BookingConfirmed {
            booking_number,
            event_name,
            quantity,
            final_amount,
        } => NotificationContent {
            title: format!("Booking confirmed — {event_name}"),
            body: format!(
                "Your booking {booking_number} for \"{event_name}\" is confirmed.\n\
                 Tickets: {quantity}. Amount paid: {final_amount}.\n\
                 Show your booking reference at the entrance."
            ),
        },
        DomainEvent::BookingCancelled {
            booking_number,
            event_name,
        } => NotificationContent {
            title: format!("Booking cancelled — {event_name}"),
            body: format!(
                "Your booking {booking_number} for \"{event_name}\" has been cancelled.\n\
                 Reserved tickets have been released."
            ),
        },
        DomainEvent::PaymentRefunded { booking_number } => NotificationContent {
            title: "Refund processed".to_string(),
            body: format!(
                "The refund for booking {booking_number} has been processed.\n\
                 The amount will be returned to your original payment method."
            ),
        },
        DomainEvent::EventReminder {
            event_name,
            venue,
            start_at,
            window,
        } => {
            let when = chrono::DateTime::from_timestamp_millis(*start_at)
                .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
                .unwrap_or_else(|| "soon".to_string());
            let venue_line = venue
                .as_deref()
                .map(|v| format!("\nVenue: {v}"))
                .unwrap_or_default();
            NotificationContent {
                title: format!("Reminder — {event_name} starts {}", window.human()),
                body: format!(
                    "\"{event_name}\" starts {} ({when}).{venue_line}\n\
                     Have your booking reference ready for check-in.",
                    window.human()
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::ReminderWindow;
    use rust_decimal::Decimal;

    #[test]
    fn test_booking_confirmed_template() {
        let content = render(&DomainEvent::BookingConfirmed {
            booking_number: "MQ-ABC123".into(),
            event_name: "Jazz Night".into(),
            quantity: 2,
            final_amount: Decimal::new(100000, 2),
        });
        assert_eq!(content.title, "Booking confirmed — Jazz Night");
        assert!(content.body.contains("MQ-ABC123"));
        assert!(content.body.contains("Tickets: 2"));
        assert!(content.body.contains("1000.00"));
    }

    #[test]
    fn test_reminder_template_mentions_window() {
        let content = render(&DomainEvent::EventReminder {
            event_name: "Jazz Night".into(),
            venue: Some("Sala Apolo".into()),
            start_at: 1_755_000_000_000,
            window: ReminderWindow::HourBefore,
        });
        assert!(content.title.contains("in one hour"));
        assert!(content.body.contains("Sala Apolo"));
    }

    #[test]
    fn test_reminder_template_without_venue() {
        let content = render(&DomainEvent::EventReminder {
            event_name: "Jazz Night".into(),
            venue: None,
            start_at: 1_755_000_000_000,
            window: ReminderWindow::DayBefore,
        });
        assert!(!content.body.contains("Venue:"));
        assert!(content.title.contains("tomorrow"));
    }
}
