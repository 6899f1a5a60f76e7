//! Email delivery channel (AWS SES)

use async_trait::async_trait;
use aws_sdk_sesv2::Client as SesClient;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};

use shared::models::ChannelKind;

use super::{NotificationChannel, NotificationContent, Recipient};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// SES-backed email channel
pub struct EmailChannel {
    ses: SesClient,
    from: String,
}

impl EmailChannel {
    pub fn new(ses: SesClient, from: &str) -> Self {
        Self {
            ses,
            from: from.to_string(),
        }
    }
}

#[async_trait]
impl NotificationChannel for EmailChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Email
    }

    fn is_available(&self) -> bool {
        !self.from.is_empty()
    }

    fn address_of<'a>(&self, recipient: &'a Recipient) -> Option<&'a str> {
        recipient.email.as_deref()
    }

    async fn deliver(&self, address: &str, content: &NotificationContent) -> Result<(), BoxError> {
        let subject = Content::builder().data(&content.title).build()?;
        let body = Body::builder()
            .text(Content::builder().data(&content.body).build()?)
            .build();
        let message = Message::builder().subject(subject).body(body).build();

        self.ses
            .send_email()
            .from_email_address(&self.from)
            .destination(Destination::builder().to_addresses(address).build())
            .content(EmailContent::builder().simple(message).build())
            .send()
            .await?;

        tracing::info!(to = address, "Notification email sent");
        Ok(())
    }
}
