//! Monday-anchored week windows.

use chrono::{Datelike, Duration};

use crate::date::NoteDate;

/// Number of days in a week view.
pub const DAYS_PER_WEEK: usize = 7;

/// The Monday-to-Sunday week containing `reference`, in order.
///
/// Weeks start on Monday, so the first date is the Monday on or before the
/// reference and the reference itself is always among the seven. This is
/// pure calendar math; no clock or timezone is involved.
pub fn week_dates(reference: NoteDate) -> Vec<NoteDate> {
    let reference = reference.naive();
    let monday = reference - Duration::days(reference.weekday().num_days_from_monday() as i64);

    (0..DAYS_PER_WEEK as i64)
        .map(|offset| NoteDate::from_naive(monday + Duration::days(offset)))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
