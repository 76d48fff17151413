//! Handlers for the `/rooms` resource and its admin management endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bookit_core::error::CoreError;
use bookit_core::room::{validate_category, RES_PER_PAGE};
use bookit_core::types::DbId;
use bookit_db::models::room::{CreateRoom, Room, RoomSearch, UpdateRoom};
use bookit_db::repositories::RoomRepo;
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// One page of search results plus the counts the listing page shows.
#[derive(Debug, Serialize)]
pub struct RoomSearchResponse {
    /// Rooms in the whole catalogue.
    pub rooms_count: i64,
    pub res_per_page: i64,
    /// Rooms matching the filters, across all pages.
    pub filtered_rooms_count: i64,
    pub rooms: Vec<Room>,
}

fn room_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Room", id })
}

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// GET /api/v1/rooms?location=&guest_capacity=&category=&page=
pub async fn search_rooms(
    State(state): State<AppState>,
    Query(params): Query<RoomSearch>,
) -> AppResult<impl IntoResponse> {
    let rooms_count = RoomRepo::count(&state.pool).await?;
    let (rooms, filtered_rooms_count) = RoomRepo::search(&state.pool, &params).await?;

    Ok(Json(DataResponse {
        data: RoomSearchResponse {
            rooms_count,
            res_per_page: RES_PER_PAGE,
            filtered_rooms_count,
            rooms,
        },
    }))
}

/// GET /api/v1/rooms/{id}
pub async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let room = RoomRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| room_not_found(id))?;
    Ok(Json(DataResponse { data: room }))
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/rooms
pub async fn admin_list_rooms(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let rooms = RoomRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: rooms }))
}

/// POST /api/v1/admin/rooms
pub async fn create_room(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateRoom>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_category(&input.category)?;

    let room = RoomRepo::create(&state.pool, &input, admin.user_id).await?;

    tracing::info!(room_id = room.id, admin_id = admin.user_id, "Room created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: room })))
}

/// PUT /api/v1/admin/rooms/{id}
pub async fn update_room(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRoom>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(category) = &input.category {
        validate_category(category)?;
    }

    let room = RoomRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| room_not_found(id))?;

    tracing::info!(room_id = id, admin_id = admin.user_id, "Room updated");
    Ok(Json(DataResponse { data: room }))
}

/// DELETE /api/v1/admin/rooms/{id}
///
/// Bookings and reviews of the room are removed with it.
pub async fn delete_room(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !RoomRepo::delete(&state.pool, id).await? {
        return Err(room_not_found(id));
    }

    tracing::info!(room_id = id, admin_id = admin.user_id, "Room deleted");
    Ok(StatusCode::NO_CONTENT)
}
