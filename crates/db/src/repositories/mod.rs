//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. [`PgBookingStore`] is the
//! exception: it owns a pool so it can stand behind the availability
//! checker's `BookingStore` trait.

pub mod booking_repo;
pub mod review_repo;
pub mod room_repo;
pub mod user_repo;

pub use booking_repo::{BookingRepo, PgBookingStore};
pub use review_repo::ReviewRepo;
pub use room_repo::RoomRepo;
pub use user_repo::UserRepo;
