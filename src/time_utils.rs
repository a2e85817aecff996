// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Week-window arithmetic.
//!
//! Every timetable operation is scoped to "the current week", identified by
//! the Monday that begins it. Callers compute the window once per request and
//! use the same value for filtering and for any record they write.

use chrono::{Datelike, Days, Local, NaiveDate};

/// The Monday of the week containing `date`.
///
/// A Monday maps to itself; a Sunday goes back six days.
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    let days_from_monday = date.weekday().num_days_from_monday();
    date - Days::new(u64::from(days_from_monday))
}

/// The Monday of the current week, per the server's local calendar.
pub fn current_week_start() -> NaiveDate {
    week_start_of(Local::now().date_naive())
}
