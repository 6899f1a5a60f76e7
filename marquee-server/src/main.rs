use std::time::Duration;

use marquee_server::{AppState, Config, api, services};
use shared::util;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marquee_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting marquee-server (env: {})", config.environment);

    // Initialize application state (pool + migrations + channels)
    let state = AppState::new(&config).await?;

    let app = api::create_router(state.clone());

    // Periodic stale-booking reaper (every minute); the internal jobs
    // endpoint covers external schedulers, this loop is the fallback.
    let reaper_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            interval.tick().await;
            match services::booking::expire_stale_bookings(&reaper_state, util::now_millis()).await
            {
                Ok(0) => {}
                Ok(n) => tracing::info!(expired = n, "Stale bookings reaped"),
                Err(e) => tracing::error!(error = ?e, "Stale booking reaper failed"),
            }
        }
    });

    // Periodic reminder scan fallback (every 5 minutes); idempotent by
    // claim keys, so overlapping with cron-triggered runs is harmless.
    let reminder_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(300));
        loop {
            interval.tick().await;
            if let Err(e) =
                services::reminders::run_reminder_scan(&reminder_state, util::now_millis()).await
            {
                tracing::error!(error = ?e, "Reminder scan failed");
            }
        }
    });

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("marquee-server listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
