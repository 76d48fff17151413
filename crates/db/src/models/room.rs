//! Room entity model and DTOs.

use bookit_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `rooms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Room {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub address: String,
    pub price_per_night_cents: i64,
    pub guest_capacity: i32,
    pub num_of_beds: i32,
    pub internet: bool,
    pub breakfast: bool,
    pub air_conditioned: bool,
    pub pets_allowed: bool,
    pub room_cleaning: bool,
    pub category: String,
    pub ratings: f64,
    pub num_of_reviews: i32,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new room.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRoom {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(range(min = 0))]
    pub price_per_night_cents: i64,
    #[validate(range(min = 1))]
    pub guest_capacity: i32,
    #[validate(range(min = 1))]
    pub num_of_beds: i32,
    #[serde(default)]
    pub internet: bool,
    #[serde(default)]
    pub breakfast: bool,
    #[serde(default)]
    pub air_conditioned: bool,
    #[serde(default)]
    pub pets_allowed: bool,
    #[serde(default)]
    pub room_cleaning: bool,
    pub category: String,
}

/// DTO for updating a room. All fields optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateRoom {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub address: Option<String>,
    #[validate(range(min = 0))]
    pub price_per_night_cents: Option<i64>,
    #[validate(range(min = 1))]
    pub guest_capacity: Option<i32>,
    #[validate(range(min = 1))]
    pub num_of_beds: Option<i32>,
    pub internet: Option<bool>,
    pub breakfast: Option<bool>,
    pub air_conditioned: Option<bool>,
    pub pets_allowed: Option<bool>,
    pub room_cleaning: Option<bool>,
    pub category: Option<String>,
}

/// Filters for the public room search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoomSearch {
    /// Case-insensitive substring of the address.
    pub location: Option<String>,
    pub guest_capacity: Option<i32>,
    pub category: Option<String>,
    /// 1-based page number.
    pub page: Option<i64>,
}
