// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Storage layer: the `RecordStore` interface, its durable (Firestore) and
//! volatile (in-process) implementations, and the per-call backend selector.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreStore;
pub use memory::MemoryStore;

use crate::config::Config;
use crate::error::Result;
use crate::models::{TimetableEntry, User, WeekStatus};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const TIMETABLE_ENTRIES: &str = "timetableentries";
}

/// Deterministic document id for a timetable entry.
///
/// Because the id encodes the `(user_id, action, week_start)` triple, two
/// entries with the same triple cannot coexist in a backend, and create-only
/// insertion makes concurrent duplicate creates lose rather than race.
pub fn entry_doc_id(user_id: &str, action: &str, week_start: NaiveDate) -> String {
    let safe_action = urlencoding::encode(action);
    format!("{}_{}_{}", user_id, safe_action, week_start)
}

/// Operations both backends provide.
///
/// Services depend only on this trait; which implementation answers is
/// decided per call by [`Storage::active`].
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Look up a user by uid.
    async fn find_user(&self, uid: &str) -> Result<Option<User>>;

    /// Create or overwrite a user, keyed by uid.
    async fn save_user(&self, user: &User) -> Result<()>;

    /// All entries for a user in the given week, in backend-native order.
    async fn entries_for_week(
        &self,
        user_id: &str,
        week_start: NaiveDate,
    ) -> Result<Vec<TimetableEntry>>;

    /// Store a new entry, assigning its id from the uniqueness triple.
    ///
    /// Fails with `AppError::Duplicate` if an entry with the same
    /// `(user_id, action, week_start)` already exists.
    async fn insert_entry(&self, entry: TimetableEntry) -> Result<TimetableEntry>;

    /// Look up an entry matching both id and week.
    async fn entry_in_week(
        &self,
        id: &str,
        week_start: NaiveDate,
    ) -> Result<Option<TimetableEntry>>;

    /// Replace the status of the entry matching both id and week, refreshing
    /// `updated_at`. Returns `None` when no entry matches.
    async fn update_entry_status(
        &self,
        id: &str,
        week_start: NaiveDate,
        status: WeekStatus,
    ) -> Result<Option<TimetableEntry>>;

    /// Remove the entry matching both id and week. Returns `false` when no
    /// entry matches.
    async fn delete_entry_in_week(&self, id: &str, week_start: NaiveDate) -> Result<bool>;
}

/// Which backend is answering requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Durable,
    Volatile,
}

/// Backend selector.
///
/// Holds the durable store when the startup connection succeeded, and always
/// holds the volatile fallback. Every service call goes through [`active`]
/// rather than caching a reference, so the decision is made per call.
///
/// [`active`]: Storage::active
pub struct Storage {
    durable: Option<FirestoreStore>,
    volatile: MemoryStore,
}

impl Storage {
    /// Attempt the durable-store connection, falling back to in-process
    /// storage when it is unreachable.
    pub async fn connect(config: &Config) -> Self {
        match FirestoreStore::connect(&config.gcp_project_id).await {
            Ok(store) => Self {
                durable: Some(store),
                volatile: MemoryStore::new(),
            },
            Err(err) => {
                tracing::warn!(error = %err, "Durable store not available, using in-memory storage");
                Self::in_memory()
            }
        }
    }

    /// Selector backed only by the volatile store.
    pub fn in_memory() -> Self {
        Self::with_stores(None, MemoryStore::new())
    }

    /// Build a selector from explicit parts. Tests use this to inject a
    /// shared volatile store.
    pub fn with_stores(durable: Option<FirestoreStore>, volatile: MemoryStore) -> Self {
        Self { durable, volatile }
    }

    /// The store that should serve the current operation.
    pub fn active(&self) -> &dyn RecordStore {
        match &self.durable {
            Some(store) => store,
            None => &self.volatile,
        }
    }

    /// Which backend [`Storage::active`] currently resolves to.
    pub fn backend(&self) -> Backend {
        if self.durable.is_some() {
            Backend::Durable
        } else {
            Backend::Volatile
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_doc_id_is_deterministic() {
        let week = NaiveDate::from_ymd_opt(2026, 8, 3).unwrap();
        assert_eq!(entry_doc_id("u1", "gym", week), "u1_gym_2026-08-03");
        assert_eq!(entry_doc_id("u1", "gym", week), entry_doc_id("u1", "gym", week));
    }

    #[test]
    fn test_entry_doc_id_encodes_action() {
        let week = NaiveDate::from_ymd_opt(2026, 8, 3).unwrap();
        assert_eq!(
            entry_doc_id("u1", "morning run", week),
            "u1_morning%20run_2026-08-03"
        );
    }

    #[test]
    fn test_selector_reports_volatile_without_durable() {
        let storage = Storage::in_memory();
        assert_eq!(storage.backend(), Backend::Volatile);
    }
}
