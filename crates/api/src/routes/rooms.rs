//! Route definitions for the `/rooms` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{reviews, rooms};
use crate::state::AppState;

/// Routes mounted at `/rooms`.
///
/// ```text
/// GET /                          -> search_rooms
/// GET /{id}                      -> get_room
/// GET /{id}/reviews              -> list_reviews
/// PUT /{id}/reviews              -> upsert_review (requires auth)
/// GET /{id}/reviews/eligibility  -> review_eligibility (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(rooms::search_rooms))
        .route("/{id}", get(rooms::get_room))
        .route(
            "/{id}/reviews",
            get(reviews::list_reviews).put(reviews::upsert_review),
        )
        .route("/{id}/reviews/eligibility", get(reviews::review_eligibility))
}
