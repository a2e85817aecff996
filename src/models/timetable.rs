// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Timetable entry model for storage and API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Per-day status value. Anything other than `"yes"`, `"no"`, or `null` is
/// rejected at deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Yes,
    No,
}

/// Status mapping for the seven weekdays.
///
/// Serialization always emits all seven keys, with `null` for unset days;
/// keys absent on input deserialize to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct WeekStatus {
    pub monday: Option<DayStatus>,
    pub tuesday: Option<DayStatus>,
    pub wednesday: Option<DayStatus>,
    pub thursday: Option<DayStatus>,
    pub friday: Option<DayStatus>,
    pub saturday: Option<DayStatus>,
    pub sunday: Option<DayStatus>,
}

/// Stored timetable entry.
///
/// The `(user_id, action, week_start)` triple is unique within a backend;
/// the entry id is derived from it by the backend at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableEntry {
    /// Backend-assigned identifier (also used as document ID)
    pub id: String,
    /// Owning user's uid (not enforced as a foreign key)
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Label for the tracked activity
    pub action: String,
    /// Monday of the week this entry belongs to
    #[serde(rename = "weekStart")]
    pub week_start: NaiveDate,
    /// Per-day status
    pub status: WeekStatus,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}
