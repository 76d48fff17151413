//! Route definitions for the `/admin` resource.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::{admin, bookings, reviews, rooms};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the `admin` role (enforced by handler extractors).
///
/// ```text
/// GET    /rooms                          -> admin_list_rooms
/// POST   /rooms                          -> create_room
/// PUT    /rooms/{id}                     -> update_room
/// DELETE /rooms/{id}                     -> delete_room
/// DELETE /rooms/{room_id}/reviews/{id}   -> delete_review
/// GET    /bookings                       -> admin_list_bookings
/// DELETE /bookings/{id}                  -> delete_booking
/// GET    /users                          -> list_users
/// GET    /users/{id}                     -> get_user
/// PUT    /users/{id}                     -> update_user
/// DELETE /users/{id}                     -> delete_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/rooms",
            get(rooms::admin_list_rooms).post(rooms::create_room),
        )
        .route(
            "/rooms/{id}",
            put(rooms::update_room).delete(rooms::delete_room),
        )
        .route(
            "/rooms/{room_id}/reviews/{id}",
            delete(reviews::delete_review),
        )
        .route("/bookings", get(bookings::admin_list_bookings))
        .route("/bookings/{id}", delete(bookings::delete_booking))
        .route("/users", get(admin::list_users))
        .route(
            "/users/{id}",
            get(admin::get_user)
                .put(admin::update_user)
                .delete(admin::delete_user),
        )
}
