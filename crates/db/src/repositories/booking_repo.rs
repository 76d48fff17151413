//! Repository for the `bookings` table, plus the Postgres-backed
//! [`BookingStore`] used by the availability checker.

use async_trait::async_trait;
use bookit_core::availability::{BookingSpan, BookingStore};
use bookit_core::types::{DbId, Timestamp};
use sqlx::{FromRow, PgPool};

use crate::models::booking::{Booking, BookingDetails, CreateBooking, CreateBookingOutcome};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, room_id, user_id, check_in_date, check_out_date, days_of_stay, \
                       amount_paid_cents, payment_info, paid_at, created_at";

/// Booking columns qualified with `b.` plus the joined room and user summary.
const DETAIL_SELECT: &str = "SELECT b.id, b.room_id, b.user_id, b.check_in_date, \
                             b.check_out_date, b.days_of_stay, b.amount_paid_cents, \
                             b.payment_info, b.paid_at, b.created_at, \
                             r.name AS room_name, \
                             r.price_per_night_cents AS room_price_per_night_cents, \
                             u.name AS user_name, u.email AS user_email \
                             FROM bookings b \
                             JOIN rooms r ON r.id = b.room_id \
                             JOIN users u ON u.id = b.user_id";

/// Inclusive overlap predicate. `$1` room, `$2` requested check-in,
/// `$3` requested check-out. Mirrors `BookingSpan::overlaps`.
const OVERLAP_FILTER: &str = "room_id = $1 AND check_in_date <= $3 AND check_out_date >= $2";

#[derive(FromRow)]
struct SpanRow {
    check_in_date: Timestamp,
    check_out_date: Timestamp,
}

impl From<SpanRow> for BookingSpan {
    fn from(row: SpanRow) -> Self {
        BookingSpan::new(row.check_in_date, row.check_out_date)
    }
}

/// Provides create/read/delete operations for bookings.
pub struct BookingRepo;

impl BookingRepo {
    /// Insert a booking unless it overlaps an existing booking on the same room.
    ///
    /// The room row is locked for the duration of the transaction, so two
    /// concurrent creations for the same room are serialized and the second
    /// one sees the first one's booking when it re-checks for overlaps.
    pub async fn create(
        pool: &PgPool,
        input: &CreateBooking,
    ) -> Result<CreateBookingOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let room: Option<DbId> = sqlx::query_scalar("SELECT id FROM rooms WHERE id = $1 FOR UPDATE")
            .bind(input.room_id)
            .fetch_optional(&mut *tx)
            .await?;
        if room.is_none() {
            return Ok(CreateBookingOutcome::RoomNotFound);
        }

        let overlap_query = format!("SELECT EXISTS (SELECT 1 FROM bookings WHERE {OVERLAP_FILTER})");
        let overlaps: bool = sqlx::query_scalar(&overlap_query)
            .bind(input.room_id)
            .bind(input.check_in_date)
            .bind(input.check_out_date)
            .fetch_one(&mut *tx)
            .await?;
        if overlaps {
            return Ok(CreateBookingOutcome::Unavailable);
        }

        let insert_query = format!(
            "INSERT INTO bookings (room_id, user_id, check_in_date, check_out_date,
                days_of_stay, amount_paid_cents, payment_info, paid_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
             RETURNING {COLUMNS}"
        );
        let booking = sqlx::query_as::<_, Booking>(&insert_query)
            .bind(input.room_id)
            .bind(input.user_id)
            .bind(input.check_in_date)
            .bind(input.check_out_date)
            .bind(input.days_of_stay)
            .bind(input.amount_paid_cents)
            .bind(&input.payment_info)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(CreateBookingOutcome::Created(booking))
    }

    /// Find a booking with its room and user summary.
    pub async fn find_details_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<BookingDetails>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE b.id = $1");
        sqlx::query_as::<_, BookingDetails>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All bookings made by `user_id`, most recent check-in first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<BookingDetails>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE b.user_id = $1 ORDER BY b.check_in_date DESC");
        sqlx::query_as::<_, BookingDetails>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Every booking in the system, most recent check-in first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<BookingDetails>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} ORDER BY b.check_in_date DESC");
        sqlx::query_as::<_, BookingDetails>(&query)
            .fetch_all(pool)
            .await
    }

    /// Whether `user_id` has ever booked `room_id`.
    pub async fn user_has_booked_room(
        pool: &PgPool,
        user_id: DbId,
        room_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM bookings WHERE user_id = $1 AND room_id = $2)",
        )
        .bind(user_id)
        .bind(room_id)
        .fetch_one(pool)
        .await
    }

    /// Delete a booking. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// [`BookingStore`] over the `bookings` table.
#[derive(Debug, Clone)]
pub struct PgBookingStore {
    pool: PgPool,
}

impl PgBookingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    type Error = sqlx::Error;

    async fn find_overlapping(
        &self,
        room_id: DbId,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<BookingSpan>, sqlx::Error> {
        let query = format!(
            "SELECT check_in_date, check_out_date FROM bookings
             WHERE {OVERLAP_FILTER}
             ORDER BY check_in_date"
        );
        let rows = sqlx::query_as::<_, SpanRow>(&query)
            .bind(room_id)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(BookingSpan::from).collect())
    }

    async fn find_by_room(&self, room_id: DbId) -> Result<Vec<BookingSpan>, sqlx::Error> {
        let rows = sqlx::query_as::<_, SpanRow>(
            "SELECT check_in_date, check_out_date FROM bookings
             WHERE room_id = $1
             ORDER BY check_in_date",
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(BookingSpan::from).collect())
    }
}
