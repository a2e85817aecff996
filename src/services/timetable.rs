// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Timetable service: week-scoped CRUD over the selected store.
//!
//! Every operation computes the week window once and uses that single value
//! for both the filter and any record it writes, so a request straddling
//! midnight cannot mix two windows.

use crate::db::Storage;
use crate::error::{AppError, Result};
use crate::models::{TimetableEntry, WeekStatus};
use crate::time_utils::current_week_start;
use std::sync::Arc;

/// Message returned by a successful delete.
pub const DELETED_MESSAGE: &str = "Timetable entry deleted successfully";

const ENTRY_NOT_FOUND: &str = "Timetable entry not found for this week";

#[derive(Clone)]
pub struct TimetableService {
    storage: Arc<Storage>,
}

impl TimetableService {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    /// All of a user's entries for the current week. Empty when none match.
    pub async fn list_current_week(&self, user_id: &str) -> Result<Vec<TimetableEntry>> {
        let week_start = current_week_start();
        tracing::debug!(user_id, %week_start, "Listing timetable entries");

        let entries = self
            .storage
            .active()
            .entries_for_week(user_id, week_start)
            .await?;

        tracing::debug!(user_id, count = entries.len(), "Found timetable entries");
        Ok(entries)
    }

    /// Create an entry for the current week.
    ///
    /// Rejected with `DuplicateEntry` when the user already has an entry for
    /// this action in this week. The store's create-only insert backstops the
    /// check under concurrent creates for the same key.
    pub async fn create(
        &self,
        user_id: String,
        action: String,
        status: WeekStatus,
    ) -> Result<TimetableEntry> {
        if user_id.is_empty() || action.is_empty() {
            return Err(AppError::Validation(
                "userId and action are required".to_string(),
            ));
        }

        let store = self.storage.active();
        let week_start = current_week_start();
        tracing::info!(user_id = %user_id, action = %action, %week_start, "Adding timetable entry");

        let existing = store.entries_for_week(&user_id, week_start).await?;
        if existing.iter().any(|e| e.action == action) {
            return Err(AppError::Duplicate(
                "Action already exists for this week".to_string(),
            ));
        }

        let now = chrono::Utc::now();
        let entry = TimetableEntry {
            // assigned by the store
            id: String::new(),
            user_id,
            action,
            week_start,
            status,
            created_at: now,
            updated_at: now,
        };

        let stored = store.insert_entry(entry).await?;
        tracing::info!(id = %stored.id, "Timetable entry saved");
        Ok(stored)
    }

    /// Replace an entry's status wholesale, scoped to the current week.
    ///
    /// An id that matches an entry from a past week is treated as not found;
    /// this is a stale-edit guard, not a generic lookup miss.
    pub async fn update(&self, id: &str, status: WeekStatus) -> Result<TimetableEntry> {
        let week_start = current_week_start();
        tracing::info!(id, %week_start, "Updating timetable entry");

        self.storage
            .active()
            .update_entry_status(id, week_start, status)
            .await?
            .ok_or_else(|| AppError::NotFound(ENTRY_NOT_FOUND.to_string()))
    }

    /// Remove an entry permanently, scoped to the current week like update.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let week_start = current_week_start();
        tracing::info!(id, %week_start, "Deleting timetable entry");

        let removed = self
            .storage
            .active()
            .delete_entry_in_week(id, week_start)
            .await?;

        if removed {
            Ok(())
        } else {
            Err(AppError::NotFound(ENTRY_NOT_FOUND.to_string()))
        }
    }
}
