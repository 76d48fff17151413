//! Handlers for the `/bookings` resource.
//!
//! Availability and booked-day lookups are public so the room page can render
//! its calendar before the guest signs in. Creating and reading bookings
//! requires authentication; a booking is visible to its owner and to admins.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bookit_core::booking::{days_of_stay, validate_new_booking};
use bookit_core::error::CoreError;
use bookit_core::invoice::{Invoice, InvoiceSource};
use bookit_core::types::{DbId, Timestamp};
use bookit_db::models::booking::{BookingDetails, CreateBooking, CreateBookingOutcome};
use bookit_db::repositories::{BookingRepo, UserRepo};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::{AvailabilityParams, RoomIdParams};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /bookings`.
#[derive(Debug, Deserialize)]
pub struct NewBookingRequest {
    pub room_id: DbId,
    pub check_in_date: Timestamp,
    pub check_out_date: Timestamp,
    pub amount_paid_cents: i64,
    /// Opaque payment processor reference, stored as-is.
    #[serde(default)]
    pub payment_info: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub room_id: DbId,
    pub check_in_date: Timestamp,
    pub check_out_date: Timestamp,
    pub is_available: bool,
}

#[derive(Debug, Serialize)]
pub struct BookedDaysResponse {
    pub room_id: DbId,
    /// One entry per day per booking. Not sorted; overlapping bookings may
    /// repeat a day.
    pub booked_dates: Vec<NaiveDate>,
}

fn booking_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Booking",
        id,
    })
}

/// Load a booking the caller is allowed to see.
async fn find_visible_booking(
    state: &AppState,
    auth: &AuthUser,
    id: DbId,
) -> AppResult<BookingDetails> {
    let booking = BookingRepo::find_details_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| booking_not_found(id))?;

    if booking.user_id != auth.user_id && !auth.is_admin() {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only view your own bookings".into(),
        )));
    }
    Ok(booking)
}

// ---------------------------------------------------------------------------
// Availability
// ---------------------------------------------------------------------------

/// GET /api/v1/bookings/availability?room_id=&check_in_date=&check_out_date=
///
/// A range is available when no booking of the room overlaps it, boundaries
/// included: checking in on another guest's check-out day is a conflict.
pub async fn check_availability(
    State(state): State<AppState>,
    Query(params): Query<AvailabilityParams>,
) -> AppResult<impl IntoResponse> {
    let is_available = state
        .availability()
        .is_range_available(params.room_id, params.check_in_date, params.check_out_date)
        .await?;

    Ok(Json(DataResponse {
        data: AvailabilityResponse {
            room_id: params.room_id,
            check_in_date: params.check_in_date,
            check_out_date: params.check_out_date,
            is_available,
        },
    }))
}

/// GET /api/v1/bookings/booked-days?room_id=
pub async fn booked_days(
    State(state): State<AppState>,
    Query(params): Query<RoomIdParams>,
) -> AppResult<impl IntoResponse> {
    let booked_dates = state
        .availability()
        .list_booked_days(params.room_id)
        .await?;

    Ok(Json(DataResponse {
        data: BookedDaysResponse {
            room_id: params.room_id,
            booked_dates,
        },
    }))
}

// ---------------------------------------------------------------------------
// Guest bookings
// ---------------------------------------------------------------------------

/// POST /api/v1/bookings
///
/// Returns 401 if the caller's account no longer exists, 404 if the room does
/// not exist and 409 if the dates overlap an existing booking of the room.
pub async fn create_booking(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<NewBookingRequest>,
) -> AppResult<impl IntoResponse> {
    validate_new_booking(
        input.check_in_date,
        input.check_out_date,
        input.amount_paid_cents,
    )?;

    if UserRepo::find_by_id(&state.pool, auth.user_id).await?.is_none() {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Account no longer exists".into(),
        )));
    }

    let create_dto = CreateBooking {
        room_id: input.room_id,
        user_id: auth.user_id,
        check_in_date: input.check_in_date,
        check_out_date: input.check_out_date,
        days_of_stay: days_of_stay(input.check_in_date, input.check_out_date),
        amount_paid_cents: input.amount_paid_cents,
        payment_info: input.payment_info,
    };

    match BookingRepo::create(&state.pool, &create_dto).await? {
        CreateBookingOutcome::Created(booking) => {
            tracing::info!(
                booking_id = booking.id,
                room_id = booking.room_id,
                user_id = auth.user_id,
                days_of_stay = booking.days_of_stay,
                "Booking created"
            );
            Ok((StatusCode::CREATED, Json(DataResponse { data: booking })))
        }
        CreateBookingOutcome::RoomNotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "Room",
            id: input.room_id,
        })),
        CreateBookingOutcome::Unavailable => {
            tracing::debug!(
                room_id = input.room_id,
                user_id = auth.user_id,
                "Booking rejected: dates taken"
            );
            Err(AppError::Core(CoreError::Conflict(
                "Room is not available for the selected dates".into(),
            )))
        }
    }
}

/// GET /api/v1/bookings/me
pub async fn my_bookings(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let bookings = BookingRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: bookings }))
}

/// GET /api/v1/bookings/{id}
pub async fn get_booking(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let booking = find_visible_booking(&state, &auth, id).await?;
    Ok(Json(DataResponse { data: booking }))
}

/// GET /api/v1/bookings/{id}/invoice
pub async fn booking_invoice(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let booking = find_visible_booking(&state, &auth, id).await?;

    let invoice = Invoice::build(
        &InvoiceSource {
            booking_id: booking.id,
            client_name: &booking.user_name,
            client_email: &booking.user_email,
            room_name: &booking.room_name,
            price_per_night_cents: booking.room_price_per_night_cents,
            days_of_stay: booking.days_of_stay,
            check_in_date: booking.check_in_date,
            check_out_date: booking.check_out_date,
            amount_paid_cents: booking.amount_paid_cents,
        },
        Utc::now(),
    );

    Ok(Json(DataResponse { data: invoice }))
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/bookings
pub async fn admin_list_bookings(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let bookings = BookingRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: bookings }))
}

/// DELETE /api/v1/admin/bookings/{id}
pub async fn delete_booking(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !BookingRepo::delete(&state.pool, id).await? {
        return Err(booking_not_found(id));
    }

    tracing::info!(booking_id = id, admin_id = admin.user_id, "Booking deleted");
    Ok(StatusCode::NO_CONTENT)
}
