//! Application state for marquee-server

use std::sync::Arc;

use aws_sdk_sesv2::Client as SesClient;
use sqlx::PgPool;

use crate::config::Config;
use crate::gateway::GatewayClient;
use crate::notify::email::EmailChannel;
use crate::notify::webhook::WebhookChannel;
use crate::notify::{DispatchStrategy, NotificationChannel, Notifier};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// Payment gateway REST client
    pub gateway: GatewayClient,
    /// Notification channel registry
    pub notifier: Notifier,
    /// JWT secret for user authentication
    pub jwt_secret: String,
    /// Shared token guarding the internal jobs endpoints
    pub jobs_token: String,
    /// Currency charged by the gateway
    pub currency: String,
    /// TTL before an unpaid PENDING booking is reaped (millis)
    pub booking_pending_ttl_ms: i64,
}

impl AppState {
    /// Create a new AppState: connect the pool, run migrations, build the
    /// gateway client and the notification channel registry.
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPool::connect(&config.database_url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let ses = SesClient::new(&aws_config);

        let channels: Vec<Arc<dyn NotificationChannel>> = vec![
            Arc::new(EmailChannel::new(ses, &config.ses_from_email)),
            Arc::new(WebhookChannel::new(&config.messaging_webhook_url)),
        ];

        Ok(Self {
            pool,
            gateway: GatewayClient::new(
                &config.gateway_base_url,
                &config.gateway_key_id,
                &config.gateway_key_secret,
            ),
            notifier: Notifier::new(channels, DispatchStrategy::All),
            jwt_secret: config.jwt_secret.clone(),
            jobs_token: config.jobs_token.clone(),
            currency: config.gateway_currency.clone(),
            booking_pending_ttl_ms: config.booking_pending_ttl_minutes * 60_000,
        })
    }
}
