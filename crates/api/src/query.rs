//! Shared query parameter types for API handlers.

use bookit_core::types::{DbId, Timestamp};
use serde::Deserialize;

/// `?room_id=` for endpoints scoped to a single room.
#[derive(Debug, Deserialize)]
pub struct RoomIdParams {
    pub room_id: DbId,
}

/// `?room_id=&check_in_date=&check_out_date=` for availability checks.
///
/// Dates are RFC 3339 timestamps; malformed values are rejected by the
/// `Query` extractor before the handler runs.
#[derive(Debug, Deserialize)]
pub struct AvailabilityParams {
    pub room_id: DbId,
    pub check_in_date: Timestamp,
    pub check_out_date: Timestamp,
}
