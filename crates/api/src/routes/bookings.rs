//! Route definitions for the `/bookings` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::bookings;
use crate::state::AppState;

/// Routes mounted at `/bookings`.
///
/// ```text
/// GET  /availability   -> check_availability (?room_id, check_in_date, check_out_date)
/// GET  /booked-days    -> booked_days (?room_id)
/// POST /               -> create_booking (requires auth)
/// GET  /me             -> my_bookings (requires auth)
/// GET  /{id}           -> get_booking (owner or admin)
/// GET  /{id}/invoice   -> booking_invoice (owner or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(bookings::create_booking))
        .route("/availability", get(bookings::check_availability))
        .route("/booked-days", get(bookings::booked_days))
        .route("/me", get(bookings::my_bookings))
        .route("/{id}", get(bookings::get_booking))
        .route("/{id}/invoice", get(bookings::booking_invoice))
}
