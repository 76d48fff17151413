//! Booking entity model and DTOs.
//!
//! Bookings have no update path: they are created once and may only be
//! deleted by an administrator.

use bookit_core::availability::BookingSpan;
use bookit_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `bookings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub room_id: DbId,
    pub user_id: DbId,
    pub check_in_date: Timestamp,
    pub check_out_date: Timestamp,
    pub days_of_stay: i32,
    pub amount_paid_cents: i64,
    pub payment_info: serde_json::Value,
    pub paid_at: Timestamp,
    pub created_at: Timestamp,
}

impl From<&Booking> for BookingSpan {
    fn from(booking: &Booking) -> Self {
        BookingSpan::new(booking.check_in_date, booking.check_out_date)
    }
}

/// A booking joined with the room and user summaries shown in listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BookingDetails {
    pub id: DbId,
    pub room_id: DbId,
    pub user_id: DbId,
    pub check_in_date: Timestamp,
    pub check_out_date: Timestamp,
    pub days_of_stay: i32,
    pub amount_paid_cents: i64,
    pub payment_info: serde_json::Value,
    pub paid_at: Timestamp,
    pub created_at: Timestamp,
    pub room_name: String,
    pub room_price_per_night_cents: i64,
    pub user_name: String,
    pub user_email: String,
}

/// DTO for inserting a booking. `days_of_stay` is derived by the caller.
#[derive(Debug, Clone)]
pub struct CreateBooking {
    pub room_id: DbId,
    pub user_id: DbId,
    pub check_in_date: Timestamp,
    pub check_out_date: Timestamp,
    pub days_of_stay: i32,
    pub amount_paid_cents: i64,
    pub payment_info: serde_json::Value,
}

/// Result of [`BookingRepo::create`](crate::repositories::BookingRepo::create).
#[derive(Debug, Clone)]
pub enum CreateBookingOutcome {
    Created(Booking),
    RoomNotFound,
    /// An existing booking overlaps the requested dates.
    Unavailable,
}
