//! Booking availability rules
//!
//! Pure functions over already-loaded bookings. Loading them, and the
//! database-level exclusion constraint that backs these checks, live in the
//! services and infrastructure layers.

pub mod overlap;
pub mod room_status;

pub use overlap::{ensure_available, find_conflict, has_overlap, StayPeriod};
pub use room_status::derive_status;
