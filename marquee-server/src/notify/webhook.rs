//! Messaging delivery channel (HTTP webhook bridge)
//!
//! Posts notification payloads to a messaging bridge (SMS/chat provider)
//! keyed by the recipient's phone number. Disabled when no bridge URL is
//! configured.

use std::time::Duration;

use async_trait::async_trait;

use shared::models::ChannelKind;

use super::{NotificationChannel, NotificationContent, Recipient};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub struct WebhookChannel {
    http: reqwest::Client,
    url: String,
}

impl WebhookChannel {
    pub fn new(url: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self {
            http,
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl NotificationChannel for WebhookChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Webhook
    }

    fn is_available(&self) -> bool {
        !self.url.is_empty()
    }

    fn address_of<'a>(&self, recipient: &'a Recipient) -> Option<&'a str> {
        recipient.phone.as_deref()
    }

    async fn deliver(&self, address: &str, content: &NotificationContent) -> Result<(), BoxError> {
        let resp = self
            .http
            .post(&self.url)
            .json(&serde_json::json!({
                "to": address,
                "title": content.title,
                "body": content.body,
            }))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(format!("Messaging bridge returned {}", resp.status()).into());
        }

        tracing::info!(to = address, "Notification message sent");
        Ok(())
    }
}
