//! Row types (`sqlx::FromRow`) and create/update DTOs, one module per table.

pub mod booking;
pub mod review;
pub mod room;
pub mod user;
