//! Booking creation rules.

use crate::error::CoreError;
use crate::types::Timestamp;

/// Longest stay a single booking may cover.
pub const MAX_STAY_DAYS: i64 = 365;

/// Whole days between check-in and check-out.
///
/// Partial days are truncated, so a 36 hour stay counts as one day.
pub fn days_of_stay(check_in: Timestamp, check_out: Timestamp) -> i32 {
    let days = (check_out - check_in).num_days();
    i32::try_from(days).unwrap_or(i32::MAX)
}

/// Validate the date range and amount of a new booking.
pub fn validate_new_booking(
    check_in: Timestamp,
    check_out: Timestamp,
    amount_paid_cents: i64,
) -> Result<(), CoreError> {
    if check_in >= check_out {
        return Err(CoreError::Validation(
            "check_out_date must be after check_in_date".into(),
        ));
    }
    if (check_out - check_in).num_days() > MAX_STAY_DAYS {
        return Err(CoreError::Validation(format!(
            "A booking may not exceed {MAX_STAY_DAYS} days"
        )));
    }
    if amount_paid_cents < 0 {
        return Err(CoreError::Validation(
            "amount_paid_cents must not be negative".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn days_of_stay_counts_whole_days() {
        let check_in = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        let check_out = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(days_of_stay(check_in, check_out), 5);
    }

    #[test]
    fn days_of_stay_truncates_partial_days() {
        let check_in = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        let check_out = Utc.with_ymd_and_hms(2024, 1, 11, 12, 0, 0).unwrap();
        assert_eq!(days_of_stay(check_in, check_out), 1);
    }

    #[test]
    fn reversed_range_is_rejected() {
        let check_in = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let check_out = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        assert_matches!(
            validate_new_booking(check_in, check_out, 100),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn empty_range_is_rejected() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        assert_matches!(
            validate_new_booking(at, at, 100),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn stay_longer_than_a_year_is_rejected() {
        let check_in = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        let at_cap = check_in + chrono::Duration::days(MAX_STAY_DAYS);
        assert!(validate_new_booking(check_in, at_cap, 100).is_ok());

        let past_cap = at_cap + chrono::Duration::days(1);
        assert_matches!(
            validate_new_booking(check_in, past_cap, 100),
            Err(CoreError::Validation(msg)) if msg.contains("365")
        );

        let far_future = Utc.with_ymd_and_hms(9999, 12, 31, 0, 0, 0).unwrap();
        assert_matches!(
            validate_new_booking(check_in, far_future, 100),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn negative_amount_is_rejected() {
        let check_in = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        let check_out = Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap();
        assert_matches!(
            validate_new_booking(check_in, check_out, -1),
            Err(CoreError::Validation(_))
        );
        assert!(validate_new_booking(check_in, check_out, 0).is_ok());
    }
}
