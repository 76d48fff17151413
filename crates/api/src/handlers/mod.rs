//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource. Handlers
//! delegate to the repositories in `bookit_db` (and the availability checker
//! in `bookit_core`) and map errors via [`AppError`](crate::error::AppError).

pub mod admin;
pub mod auth;
pub mod bookings;
pub mod reviews;
pub mod rooms;
