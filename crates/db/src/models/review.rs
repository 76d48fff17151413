//! Review entity model and DTOs.

use bookit_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `reviews` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub room_id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing a user's review of a room.
#[derive(Debug, Clone)]
pub struct UpsertReview {
    pub room_id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub rating: i32,
    pub comment: String,
}
