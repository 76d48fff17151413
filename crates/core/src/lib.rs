//! Domain layer for the BookIt room-booking backend.
//!
//! Has no internal dependencies so that the repository layer, the HTTP layer
//! and any tooling can all share it.

pub mod availability;
pub mod booking;
pub mod error;
pub mod invoice;
pub mod review;
pub mod roles;
pub mod room;
pub mod types;
