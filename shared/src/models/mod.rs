//! Domain models for the Marquee ticketing platform

pub mod booking;
pub mod check_in;
pub mod event;
pub mod notification;
pub mod payment;
pub mod role;
pub mod ticket;

pub use booking::{Booking, BookingItem, BookingStatus};
pub use check_in::{CheckIn, CheckInMethod};
pub use event::{Event, EventStatus};
pub use notification::{ChannelKind, Notification};
pub use payment::{Payment, PaymentMethod, PaymentStatus};
pub use role::EventRole;
pub use ticket::Ticket;
