// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod timetable;
pub mod user;

pub use timetable::TimetableService;
pub use user::{UpsertUser, UserService};
