//! Notification orchestration
//!
//! Fans a domain event out to delivery channels. Channels are small
//! registered capabilities behind [`NotificationChannel`]; the orchestrator
//! iterates the registry per [`DispatchStrategy`] and records every attempt
//! in the append-only notification log. Dispatch always runs after the
//! triggering transaction has committed — a failed delivery can never roll
//! back a settled payment.

pub mod email;
pub mod template;
pub mod webhook;

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use shared::models::ChannelKind;

use crate::db;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Who a notification is addressed to
#[derive(Debug, Clone)]
pub struct Recipient {
    pub user_id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Reminder lead time before an event starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderWindow {
    DayBefore,
    HourBefore,
}

impl ReminderWindow {
    pub const ALL: [ReminderWindow; 2] = [Self::DayBefore, Self::HourBefore];

    /// Lead time in milliseconds
    pub fn offset_ms(&self) -> i64 {
        match self {
            Self::DayBefore => 24 * 60 * 60 * 1000,
            Self::HourBefore => 60 * 60 * 1000,
        }
    }

    /// Database string representation (reminder claim key)
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::DayBefore => "DAY_BEFORE",
            Self::HourBefore => "HOUR_BEFORE",
        }
    }

    /// Human wording used in reminder copy
    pub fn human(&self) -> &'static str {
        match self {
            Self::DayBefore => "tomorrow",
            Self::HourBefore => "in one hour",
        }
    }
}

/// Domain event carried into notification templates
#[derive(Debug, Clone)]
pub enum DomainEvent {
    BookingConfirmed {
        booking_number: String,
        event_name: String,
        quantity: i32,
        final_amount: Decimal,
    },
    BookingCancelled {
        booking_number: String,
        event_name: String,
    },
    PaymentRefunded {
        booking_number: String,
    },
    EventReminder {
        event_name: String,
        venue: Option<String>,
        start_at: i64,
        window: ReminderWindow,
    },
}

impl DomainEvent {
    /// Stable kind string stored in the notification log
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BookingConfirmed { .. } => "BOOKING_CONFIRMED",
            Self::BookingCancelled { .. } => "BOOKING_CANCELLED",
            Self::PaymentRefunded { .. } => "PAYMENT_REFUNDED",
            Self::EventReminder { .. } => "EVENT_REMINDER",
        }
    }
}

/// Rendered notification content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
}

/// One delivery capability (email, messaging webhook, ...)
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    fn kind(&self) -> ChannelKind;

    /// Is the channel configured at all? Unavailable channels are skipped
    /// without counting as failures.
    fn is_available(&self) -> bool;

    /// Recipient address for this channel, if the user has one
    fn address_of<'a>(&self, recipient: &'a Recipient) -> Option<&'a str>;

    async fn deliver(&self, address: &str, content: &NotificationContent) -> Result<(), BoxError>;
}

/// How the registry is traversed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStrategy {
    /// Attempt every available channel
    All,
    /// Attempt channels in registration order until one succeeds
    Fallback,
}

/// Outcome of one delivery attempt
#[derive(Debug, Clone)]
pub struct ChannelOutcome {
    pub channel: ChannelKind,
    pub result: Result<(), String>,
}

/// Core fan-out: iterate the registry, skip unavailable/unaddressable
/// channels, attempt the rest. A failure on one channel never blocks the
/// others; `Fallback` stops at the first success.
pub async fn dispatch_to_channels(
    channels: &[Arc<dyn NotificationChannel>],
    strategy: DispatchStrategy,
    recipient: &Recipient,
    content: &NotificationContent,
) -> Vec<ChannelOutcome> {
    let mut outcomes = Vec::new();

    for channel in channels {
        if !channel.is_available() {
            tracing::debug!(channel = channel.kind().as_db(), "Channel unavailable, skipping");
            continue;
        }
        let Some(address) = channel.address_of(recipient) else {
            tracing::debug!(
                channel = channel.kind().as_db(),
                user_id = recipient.user_id,
                "Recipient has no address for channel, skipping"
            );
            continue;
        };

        match channel.deliver(address, content).await {
            Ok(()) => {
                outcomes.push(ChannelOutcome {
                    channel: channel.kind(),
                    result: Ok(()),
                });
                if strategy == DispatchStrategy::Fallback {
                    break;
                }
            }
            Err(e) => {
                tracing::warn!(
                    channel = channel.kind().as_db(),
                    user_id = recipient.user_id,
                    error = %e,
                    "Notification delivery failed"
                );
                outcomes.push(ChannelOutcome {
                    channel: channel.kind(),
                    result: Err(e.to_string()),
                });
            }
        }
    }

    outcomes
}

/// Channel registry + strategy, shared through [`crate::state::AppState`]
#[derive(Clone)]
pub struct Notifier {
    channels: Arc<Vec<Arc<dyn NotificationChannel>>>,
    strategy: DispatchStrategy,
}

impl Notifier {
    pub fn new(channels: Vec<Arc<dyn NotificationChannel>>, strategy: DispatchStrategy) -> Self {
        Self {
            channels: Arc::new(channels),
            strategy,
        }
    }

    /// Render and deliver a domain event, recording one notification row
    /// per attempt. Never returns an error: delivery failures are logged
    /// and recorded, not surfaced to the triggering caller.
    pub async fn dispatch(&self, pool: &PgPool, recipient: &Recipient, event: &DomainEvent) {
        let content = template::render(event);
        let outcomes =
            dispatch_to_channels(&self.channels, self.strategy, recipient, &content).await;

        if outcomes.is_empty() {
            tracing::debug!(
                user_id = recipient.user_id,
                kind = event.kind(),
                "No channel attempted for notification"
            );
        }

        for outcome in &outcomes {
            let record = db::notifications::NewNotification {
                user_id: recipient.user_id,
                kind: event.kind(),
                channel: outcome.channel.as_db(),
                title: &content.title,
                body: &content.body,
                error: outcome.result.as_ref().err().map(String::as_str),
                now: shared::util::now_millis(),
            };
            if let Err(e) = db::notifications::record(pool, &record).await {
                tracing::error!(error = %e, "Failed to record notification attempt");
            }
        }
    }

    /// Fire-and-forget dispatch on a detached task, for use after a
    /// transaction commit.
    pub fn dispatch_detached(&self, pool: PgPool, recipient: Recipient, event: DomainEvent) {
        let notifier = self.clone();
        tokio::spawn(async move {
            notifier.dispatch(&pool, &recipient, &event).await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeChannel {
        kind: ChannelKind,
        available: bool,
        fail: bool,
        attempts: AtomicUsize,
    }

    impl FakeChannel {
        fn new(kind: ChannelKind) -> Self {
            Self {
                kind,
                available: true,
                fail: false,
                attempts: AtomicUsize::new(0),
            }
        }

        fn failing(kind: ChannelKind) -> Self {
            Self {
                fail: true,
                ..Self::new(kind)
            }
        }

        fn unavailable(kind: ChannelKind) -> Self {
            Self {
                available: false,
                ..Self::new(kind)
            }
        }
    }

    #[async_trait]
    impl NotificationChannel for FakeChannel {
        fn kind(&self) -> ChannelKind {
            self.kind
        }

        fn is_available(&self) -> bool {
            self.available
        }

        fn address_of<'a>(&self, recipient: &'a Recipient) -> Option<&'a str> {
            match self.kind {
                ChannelKind::Email => recipient.email.as_deref(),
                ChannelKind::Webhook => recipient.phone.as_deref(),
            }
        }

        async fn deliver(
            &self,
            _address: &str,
            _content: &NotificationContent,
        ) -> Result<(), BoxError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err("delivery refused".into())
            } else {
                Ok(())
            }
        }
    }

    fn recipient() -> Recipient {
        Recipient {
            user_id: 7,
            name: "Ada".into(),
            email: Some("ada@example.com".into()),
            phone: Some("+34600000000".into()),
        }
    }

    fn content() -> NotificationContent {
        NotificationContent {
            title: "t".into(),
            body: "b".into(),
        }
    }

    #[tokio::test]
    async fn test_all_strategy_attempts_every_channel() {
        let email = Arc::new(FakeChannel::new(ChannelKind::Email));
        let webhook = Arc::new(FakeChannel::new(ChannelKind::Webhook));
        let channels: Vec<Arc<dyn NotificationChannel>> = vec![email.clone(), webhook.clone()];

        let outcomes =
            dispatch_to_channels(&channels, DispatchStrategy::All, &recipient(), &content()).await;

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| o.result.is_ok()));
        assert_eq!(email.attempts.load(Ordering::SeqCst), 1);
        assert_eq!(webhook.attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_one_failure_never_blocks_others() {
        let email = Arc::new(FakeChannel::failing(ChannelKind::Email));
        let webhook = Arc::new(FakeChannel::new(ChannelKind::Webhook));
        let channels: Vec<Arc<dyn NotificationChannel>> = vec![email, webhook.clone()];

        let outcomes =
            dispatch_to_channels(&channels, DispatchStrategy::All, &recipient(), &content()).await;

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].result.is_err());
        assert!(outcomes[1].result.is_ok());
        assert_eq!(webhook.attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fallback_stops_at_first_success() {
        let email = Arc::new(FakeChannel::new(ChannelKind::Email));
        let webhook = Arc::new(FakeChannel::new(ChannelKind::Webhook));
        let channels: Vec<Arc<dyn NotificationChannel>> = vec![email.clone(), webhook.clone()];

        let outcomes =
            dispatch_to_channels(&channels, DispatchStrategy::Fallback, &recipient(), &content())
                .await;

        assert_eq!(outcomes.len(), 1);
        assert_eq!(email.attempts.load(Ordering::SeqCst), 1);
        assert_eq!(webhook.attempts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fallback_advances_past_failures() {
        let email = Arc::new(FakeChannel::failing(ChannelKind::Email));
        let webhook = Arc::new(FakeChannel::new(ChannelKind::Webhook));
        let channels: Vec<Arc<dyn NotificationChannel>> = vec![email, webhook.clone()];

        let outcomes =
            dispatch_to_channels(&channels, DispatchStrategy::Fallback, &recipient(), &content())
                .await;

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].result.is_err());
        assert!(outcomes[1].result.is_ok());
    }

    #[tokio::test]
    async fn test_unavailable_channel_is_skipped_silently() {
        let email = Arc::new(FakeChannel::unavailable(ChannelKind::Email));
        let webhook = Arc::new(FakeChannel::new(ChannelKind::Webhook));
        let channels: Vec<Arc<dyn NotificationChannel>> = vec![email.clone(), webhook];

        let outcomes =
            dispatch_to_channels(&channels, DispatchStrategy::All, &recipient(), &content()).await;

        // Unavailable channel is neither attempted nor recorded as a failure
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].channel, ChannelKind::Webhook);
        assert_eq!(email.attempts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_address_is_skipped_silently() {
        let email = Arc::new(FakeChannel::new(ChannelKind::Email));
        let channels: Vec<Arc<dyn NotificationChannel>> = vec![email.clone()];

        let mut r = recipient();
        r.email = None;
        let outcomes =
            dispatch_to_channels(&channels, DispatchStrategy::All, &r, &content()).await;

        assert!(outcomes.is_empty());
        assert_eq!(email.attempts.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_reminder_window_offsets() {
        assert_eq!(ReminderWindow::DayBefore.offset_ms(), 86_400_000);
        assert_eq!(ReminderWindow::HourBefore.offset_ms(), 3_600_000);
        assert_eq!(ReminderWindow::DayBefore.as_db(), "DAY_BEFORE");
        assert_eq!(ReminderWindow::HourBefore.as_db(), "HOUR_BEFORE");
    }
}
