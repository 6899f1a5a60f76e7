//! marquee-server — booking, inventory & payment settlement core
//!
//! Long-running service that:
//! - Reserves finite ticket inventory and creates bookings atomically
//! - Bridges bookings to an external payment gateway (exactly-once capture)
//! - Records idempotent event check-ins
//! - Fans domain events out to notification channels and scheduled reminders

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod gateway;
pub mod notify;
pub mod services;
pub mod state;

pub use config::Config;
pub use state::AppState;
