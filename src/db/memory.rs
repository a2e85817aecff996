// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process fallback store.
//!
//! Holds the same record shapes as the durable store for the lifetime of the
//! process; created empty at startup and lost on restart. Mutations are
//! serialized per key by the concurrent map, so a racing duplicate create
//! sees the occupied slot and fails.

use crate::db::{entry_doc_id, RecordStore};
use crate::error::{AppError, Result};
use crate::models::{TimetableEntry, User, WeekStatus};
use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// Volatile record store. Cloning shares the underlying maps.
#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<DashMap<String, User>>,
    entries: Arc<DashMap<String, TimetableEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find_user(&self, uid: &str) -> Result<Option<User>> {
        Ok(self.users.get(uid).map(|u| u.value().clone()))
    }

    async fn save_user(&self, user: &User) -> Result<()> {
        self.users.insert(user.uid.clone(), user.clone());
        Ok(())
    }

    async fn entries_for_week(
        &self,
        user_id: &str,
        week_start: NaiveDate,
    ) -> Result<Vec<TimetableEntry>> {
        Ok(self
            .entries
            .iter()
            .filter(|e| e.user_id == user_id && e.week_start == week_start)
            .map(|e| e.value().clone())
            .collect())
    }

    async fn insert_entry(&self, mut entry: TimetableEntry) -> Result<TimetableEntry> {
        entry.id = entry_doc_id(&entry.user_id, &entry.action, entry.week_start);

        match self.entries.entry(entry.id.clone()) {
            Entry::Occupied(_) => Err(AppError::Duplicate(
                "Action already exists for this week".to_string(),
            )),
            Entry::Vacant(slot) => {
                slot.insert(entry.clone());
                Ok(entry)
            }
        }
    }

    async fn entry_in_week(
        &self,
        id: &str,
        week_start: NaiveDate,
    ) -> Result<Option<TimetableEntry>> {
        Ok(self
            .entries
            .get(id)
            .filter(|e| e.week_start == week_start)
            .map(|e| e.value().clone()))
    }

    async fn update_entry_status(
        &self,
        id: &str,
        week_start: NaiveDate,
        status: WeekStatus,
    ) -> Result<Option<TimetableEntry>> {
        let updated = self.entries.get_mut(id).and_then(|mut e| {
            if e.week_start != week_start {
                return None;
            }
            e.status = status.clone();
            e.updated_at = chrono::Utc::now();
            Some(e.value().clone())
        });
        Ok(updated)
    }

    async fn delete_entry_in_week(&self, id: &str, week_start: NaiveDate) -> Result<bool> {
        Ok(self
            .entries
            .remove_if(id, |_, e| e.week_start == week_start)
            .is_some())
    }
}
