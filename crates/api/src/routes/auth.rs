//! Route definitions for the `/auth` resource and the `/me` profile.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /register                -> register
/// GET  /verify/{token}          -> verify
/// POST /login                   -> login
/// POST /password/forgot         -> forgot_password
/// PUT  /password/reset/{token}  -> reset_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/verify/{token}", get(auth::verify))
        .route("/login", post(auth::login))
        .route("/password/forgot", post(auth::forgot_password))
        .route("/password/reset/{token}", put(auth::reset_password))
}

/// Routes mounted at `/me` (requires auth).
///
/// ```text
/// GET /  -> me
/// PUT /  -> update_me
/// ```
pub fn me_router() -> Router<AppState> {
    Router::new().route("/", get(auth::me).put(auth::update_me))
}
