//! Repository for the `reviews` table.
//!
//! Every write also refreshes the denormalized `ratings` and `num_of_reviews`
//! columns on the reviewed room, inside the same transaction.

use bookit_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::review::{Review, UpsertReview};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, room_id, user_id, name, rating, comment, created_at, updated_at";

/// Provides review operations.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Create the user's review of a room, or replace its rating and comment
    /// if they already reviewed it.
    pub async fn upsert(pool: &PgPool, input: &UpsertReview) -> Result<Review, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO reviews (room_id, user_id, name, rating, comment)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT ON CONSTRAINT uq_reviews_room_user DO UPDATE SET
                rating = EXCLUDED.rating,
                comment = EXCLUDED.comment,
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        let review = sqlx::query_as::<_, Review>(&query)
            .bind(input.room_id)
            .bind(input.user_id)
            .bind(&input.name)
            .bind(input.rating)
            .bind(&input.comment)
            .fetch_one(&mut *tx)
            .await?;

        refresh_room_rating(&mut tx, input.room_id).await?;

        tx.commit().await?;
        Ok(review)
    }

    /// All reviews of a room, oldest first.
    pub async fn list_for_room(pool: &PgPool, room_id: DbId) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE room_id = $1 ORDER BY created_at, id");
        sqlx::query_as::<_, Review>(&query)
            .bind(room_id)
            .fetch_all(pool)
            .await
    }

    /// Delete review `id` of `room_id`. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, room_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query("DELETE FROM reviews WHERE id = $1 AND room_id = $2")
            .bind(id)
            .bind(room_id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(false);
        }

        refresh_room_rating(&mut tx, room_id).await?;

        tx.commit().await?;
        Ok(true)
    }
}

/// Recompute the room's average rating and review count from its reviews.
/// A room without reviews is rated 0.
pub(crate) async fn refresh_room_rating(conn: &mut PgConnection, room_id: DbId) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE rooms SET
            ratings = COALESCE((SELECT AVG(rating)::DOUBLE PRECISION FROM reviews WHERE room_id = $1), 0),
            num_of_reviews = (SELECT COUNT(*) FROM reviews WHERE room_id = $1),
            updated_at = NOW()
         WHERE id = $1",
    )
    .bind(room_id)
    .execute(conn)
    .await?;
    Ok(())
}
