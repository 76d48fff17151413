use std::sync::Arc;

use bookit_core::availability::AvailabilityChecker;
use bookit_db::repositories::PgBookingStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: bookit_db::DbPool,
    /// Server configuration (JWT settings, calendar offset, ...).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(pool: bookit_db::DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }

    /// Availability checker over the live `bookings` table.
    pub fn availability(&self) -> AvailabilityChecker<PgBookingStore> {
        AvailabilityChecker::new(
            PgBookingStore::new(self.pool.clone()),
            self.config.calendar_offset,
        )
    }
}
