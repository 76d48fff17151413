//! Handlers for room reviews.
//!
//! A user may review a room once they have booked it. Reviewing again
//! replaces their earlier rating and comment.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bookit_core::error::CoreError;
use bookit_core::review::validate_rating;
use bookit_core::types::DbId;
use bookit_db::models::review::UpsertReview;
use bookit_db::repositories::{BookingRepo, ReviewRepo, RoomRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /rooms/{id}/reviews`.
#[derive(Debug, Deserialize, Validate)]
pub struct ReviewRequest {
    pub rating: i32,
    #[validate(length(min = 1, max = 1000))]
    pub comment: String,
}

#[derive(Debug, Serialize)]
pub struct EligibilityResponse {
    pub is_review_available: bool,
}

async fn ensure_room_exists(state: &AppState, room_id: DbId) -> AppResult<()> {
    RoomRepo::find_by_id(&state.pool, room_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Room",
            id: room_id,
        }))?;
    Ok(())
}

/// GET /api/v1/rooms/{id}/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(room_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_room_exists(&state, room_id).await?;
    let reviews = ReviewRepo::list_for_room(&state.pool, room_id).await?;
    Ok(Json(DataResponse { data: reviews }))
}

/// PUT /api/v1/rooms/{id}/reviews
pub async fn upsert_review(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Path(room_id): Path<DbId>,
    Json(input): Json<ReviewRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_rating(input.rating)?;
    ensure_room_exists(&state, room_id).await?;

    if !BookingRepo::user_has_booked_room(&state.pool, auth.user_id, room_id).await? {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only guests who booked this room can review it".into(),
        )));
    }

    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    let review = ReviewRepo::upsert(
        &state.pool,
        &UpsertReview {
            room_id,
            user_id: user.id,
            name: user.name,
            rating: input.rating,
            comment: input.comment,
        },
    )
    .await?;

    tracing::info!(room_id, user_id = auth.user_id, review_id = review.id, "Review saved");
    Ok(Json(DataResponse { data: review }))
}

/// GET /api/v1/rooms/{id}/reviews/eligibility
pub async fn review_eligibility(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Path(room_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let is_review_available =
        BookingRepo::user_has_booked_room(&state.pool, auth.user_id, room_id).await?;
    Ok(Json(DataResponse {
        data: EligibilityResponse {
            is_review_available,
        },
    }))
}

/// DELETE /api/v1/admin/rooms/{room_id}/reviews/{id}
pub async fn delete_review(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path((room_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if !ReviewRepo::delete(&state.pool, room_id, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Review",
            id,
        }));
    }

    tracing::info!(room_id, review_id = id, admin_id = admin.user_id, "Review deleted");
    Ok(StatusCode::NO_CONTENT)
}
