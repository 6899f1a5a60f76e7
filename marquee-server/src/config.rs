//! Server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration, loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// Payment gateway REST base URL
    pub gateway_base_url: String,
    /// Payment gateway key id (public half, returned to clients)
    pub gateway_key_id: String,
    /// Payment gateway key secret (HMAC signing key)
    pub gateway_key_secret: String,
    /// Currency code charged by the gateway
    pub gateway_currency: String,
    /// JWT secret for user authentication
    pub jwt_secret: String,
    /// Shared token guarding the internal jobs endpoints
    pub jobs_token: String,
    /// SES sender email address
    pub ses_from_email: String,
    /// Messaging webhook base URL (empty disables the channel)
    pub messaging_webhook_url: String,
    /// Minutes before an unpaid PENDING booking is reaped
    pub booking_pending_ttl_minutes: i64,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: environment.clone(),
            gateway_base_url: std::env::var("GATEWAY_BASE_URL")
                .unwrap_or_else(|_| "https://api.paygate.example".into()),
            gateway_key_id: std::env::var("GATEWAY_KEY_ID")
                .unwrap_or_else(|_| "mq_test_key".into()),
            gateway_key_secret: Self::require_secret("GATEWAY_KEY_SECRET", &environment)?,
            gateway_currency: std::env::var("GATEWAY_CURRENCY").unwrap_or_else(|_| "EUR".into()),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            jobs_token: Self::require_secret("JOBS_TOKEN", &environment)?,
            ses_from_email: std::env::var("SES_FROM_EMAIL")
                .unwrap_or_else(|_| "tickets@marquee.app".into()),
            messaging_webhook_url: std::env::var("MESSAGING_WEBHOOK_URL").unwrap_or_default(),
            booking_pending_ttl_minutes: std::env::var("BOOKING_PENDING_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        })
    }
}
