//! Service layer — transactional orchestration over the db modules
//!
//! Each operation that touches inventory, payment, or check-in state runs
//! inside a single database transaction with guarded status transitions;
//! notification dispatch always happens after commit.

pub mod booking;
pub mod check_in;
pub mod payment;
pub mod reminders;
