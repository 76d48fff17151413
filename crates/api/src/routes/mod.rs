pub mod admin;
pub mod auth;
pub mod bookings;
pub mod health;
pub mod rooms;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/verify/{token}                             verify email (public)
/// /auth/login                                      login (public)
/// /auth/password/forgot                            request reset (public)
/// /auth/password/reset/{token}                     reset password (public)
///
/// /me                                              get, update own profile
///
/// /rooms                                           search (public)
/// /rooms/{id}                                      get (public)
/// /rooms/{id}/reviews                              list (public), upsert own
/// /rooms/{id}/reviews/eligibility                  can the caller review
///
/// /bookings                                        create (auth)
/// /bookings/availability                           range availability (public)
/// /bookings/booked-days                            booked calendar days (public)
/// /bookings/me                                     own bookings
/// /bookings/{id}                                   get (owner or admin)
/// /bookings/{id}/invoice                           invoice (owner or admin)
///
/// /admin/rooms                                     list, create (admin only)
/// /admin/rooms/{id}                                update, delete
/// /admin/rooms/{room_id}/reviews/{id}              delete review
/// /admin/bookings                                  list all
/// /admin/bookings/{id}                             delete
/// /admin/users                                     list
/// /admin/users/{id}                                get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Registration, verification, login and password reset.
        .nest("/auth", auth::router())
        // The caller's own profile.
        .nest("/me", auth::me_router())
        // Room catalogue and reviews.
        .nest("/rooms", rooms::router())
        // Availability, calendar and guest bookings.
        .nest("/bookings", bookings::router())
        // Admin management of rooms, reviews, bookings and users.
        .nest("/admin", admin::router())
}
