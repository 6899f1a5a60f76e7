//! Shared types for the Marquee ticketing platform
//!
//! Domain models, the unified error system, and ID/time utilities used by
//! the server and any future client crates.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};
