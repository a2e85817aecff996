// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod timetable;
pub mod user;

pub use timetable::{DayStatus, TimetableEntry, WeekStatus};
pub use user::User;
