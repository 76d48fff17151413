//! Repository for the `rooms` table.

use bookit_core::room::{page_offset, RES_PER_PAGE};
use bookit_core::types::DbId;
use sqlx::PgPool;

use crate::models::room::{CreateRoom, Room, RoomSearch, UpdateRoom};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, address, price_per_night_cents, guest_capacity, \
                       num_of_beds, internet, breakfast, air_conditioned, pets_allowed, \
                       room_cleaning, category, ratings, num_of_reviews, created_by, \
                       created_at, updated_at";

/// Search predicate. `$1` location, `$2` guest capacity, `$3` category; a NULL
/// parameter disables its filter.
const SEARCH_FILTER: &str = "($1::TEXT IS NULL OR address ILIKE '%' || $1 || '%') \
                             AND ($2::INTEGER IS NULL OR guest_capacity = $2) \
                             AND ($3::TEXT IS NULL OR category = $3)";

/// Provides CRUD and search operations for rooms.
pub struct RoomRepo;

impl RoomRepo {
    /// Insert a new room, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateRoom,
        created_by: DbId,
    ) -> Result<Room, sqlx::Error> {
        let query = format!(
            "INSERT INTO rooms (name, description, address, price_per_night_cents,
                guest_capacity, num_of_beds, internet, breakfast, air_conditioned,
                pets_allowed, room_cleaning, category, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.address)
            .bind(input.price_per_night_cents)
            .bind(input.guest_capacity)
            .bind(input.num_of_beds)
            .bind(input.internet)
            .bind(input.breakfast)
            .bind(input.air_conditioned)
            .bind(input.pets_allowed)
            .bind(input.room_cleaning)
            .bind(&input.category)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a room by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Room>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rooms WHERE id = $1");
        sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every room, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Room>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rooms ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Room>(&query).fetch_all(pool).await
    }

    /// Total number of rooms, ignoring any filters.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM rooms")
            .fetch_one(pool)
            .await
    }

    /// Filtered search, returning one page of rooms plus the number of rooms
    /// matching the filters across all pages.
    pub async fn search(
        pool: &PgPool,
        params: &RoomSearch,
    ) -> Result<(Vec<Room>, i64), sqlx::Error> {
        let location = params
            .location
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let count_query = format!("SELECT COUNT(*) FROM rooms WHERE {SEARCH_FILTER}");
        let filtered: i64 = sqlx::query_scalar(&count_query)
            .bind(location)
            .bind(params.guest_capacity)
            .bind(&params.category)
            .fetch_one(pool)
            .await?;

        let page_query = format!(
            "SELECT {COLUMNS} FROM rooms WHERE {SEARCH_FILTER}
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        let rooms = sqlx::query_as::<_, Room>(&page_query)
            .bind(location)
            .bind(params.guest_capacity)
            .bind(&params.category)
            .bind(RES_PER_PAGE)
            .bind(page_offset(params.page))
            .fetch_all(pool)
            .await?;

        Ok((rooms, filtered))
    }

    /// Update a room. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRoom,
    ) -> Result<Option<Room>, sqlx::Error> {
        let query = format!(
            "UPDATE rooms SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                address = COALESCE($4, address),
                price_per_night_cents = COALESCE($5, price_per_night_cents),
                guest_capacity = COALESCE($6, guest_capacity),
                num_of_beds = COALESCE($7, num_of_beds),
                internet = COALESCE($8, internet),
                breakfast = COALESCE($9, breakfast),
                air_conditioned = COALESCE($10, air_conditioned),
                pets_allowed = COALESCE($11, pets_allowed),
                room_cleaning = COALESCE($12, room_cleaning),
                category = COALESCE($13, category),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.address)
            .bind(input.price_per_night_cents)
            .bind(input.guest_capacity)
            .bind(input.num_of_beds)
            .bind(input.internet)
            .bind(input.breakfast)
            .bind(input.air_conditioned)
            .bind(input.pets_allowed)
            .bind(input.room_cleaning)
            .bind(&input.category)
            .fetch_optional(pool)
            .await
    }

    /// Delete a room together with its bookings and reviews (ON DELETE CASCADE).
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
