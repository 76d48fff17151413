//! Room availability checks and booked-day enumeration.
//!
//! Two bookings on the same room conflict when neither ends strictly before
//! the other begins. The boundary is inclusive: a check-out on day X and a
//! new check-in on day X are a conflict.
//!
//! The checker is stateless. Every call reads the current booking set through
//! a [`BookingStore`], so results are never cached.

use async_trait::async_trait;
use chrono::{Duration, FixedOffset, NaiveDate, Offset};
use serde::Serialize;

use crate::types::{DbId, Timestamp};

/// The part of a booking the checker cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BookingSpan {
    pub check_in_date: Timestamp,
    pub check_out_date: Timestamp,
}

impl BookingSpan {
    pub fn new(check_in_date: Timestamp, check_out_date: Timestamp) -> Self {
        Self {
            check_in_date,
            check_out_date,
        }
    }

    /// Inclusive overlap test against a requested `[start, end]` range.
    ///
    /// Must stay in sync with the SQL predicate used by the Postgres store.
    pub fn overlaps(&self, start: Timestamp, end: Timestamp) -> bool {
        self.check_in_date <= end && self.check_out_date >= start
    }
}

/// Read access to the booking set, keyed by room.
#[async_trait]
pub trait BookingStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Bookings on `room_id` that overlap `[start, end]` (inclusive).
    async fn find_overlapping(
        &self,
        room_id: DbId,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<BookingSpan>, Self::Error>;

    /// Every booking on `room_id`.
    async fn find_by_room(&self, room_id: DbId) -> Result<Vec<BookingSpan>, Self::Error>;
}

/// Answers "is this room free?" and "which days are taken?" for a room.
#[derive(Debug, Clone)]
pub struct AvailabilityChecker<S> {
    store: S,
    calendar_offset: Option<FixedOffset>,
}

impl<S: BookingStore> AvailabilityChecker<S> {
    /// `calendar_offset` is applied to booking timestamps before they are
    /// cut into calendar days by [`list_booked_days`](Self::list_booked_days).
    /// `None` follows the server's local offset, read again on every call so
    /// a daylight saving change is picked up without a restart.
    pub fn new(store: S, calendar_offset: Option<FixedOffset>) -> Self {
        Self {
            store,
            calendar_offset,
        }
    }

    /// Returns `true` when no booking on `room_id` overlaps the requested range.
    ///
    /// The caller is responsible for `check_in < check_out`.
    pub async fn is_range_available(
        &self,
        room_id: DbId,
        check_in: Timestamp,
        check_out: Timestamp,
    ) -> Result<bool, S::Error> {
        let conflicts = self
            .store
            .find_overlapping(room_id, check_in, check_out)
            .await?;
        Ok(conflicts.is_empty())
    }

    /// Every calendar day covered by a booking on `room_id`.
    ///
    /// Days from different bookings are concatenated in store order, so the
    /// result may contain duplicates and is not sorted.
    pub async fn list_booked_days(&self, room_id: DbId) -> Result<Vec<NaiveDate>, S::Error> {
        let bookings = self.store.find_by_room(room_id).await?;
        let offset = self.calendar_offset();
        Ok(bookings
            .iter()
            .flat_map(|span| booked_days(span, offset))
            .collect())
    }

    /// The offset booked days are cut in right now.
    pub fn calendar_offset(&self) -> FixedOffset {
        self.calendar_offset.unwrap_or_else(local_calendar_offset)
    }
}

/// Expand a booking into calendar days.
///
/// Both ends are shifted into `offset`; the walk starts at the shifted
/// check-in and advances one day at a time while it stays at or before the
/// shifted check-out.
pub fn booked_days(span: &BookingSpan, offset: FixedOffset) -> impl Iterator<Item = NaiveDate> {
    let start = span.check_in_date.with_timezone(&offset);
    let end = span.check_out_date.with_timezone(&offset);

    std::iter::successors(Some(start), |day| day.checked_add_signed(Duration::days(1)))
        .take_while(move |day| *day <= end)
        .map(|day| day.date_naive())
}

/// The UTC offset of the machine the server runs on.
pub fn local_calendar_offset() -> FixedOffset {
    chrono::Local::now().offset().fix()
}
