// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Durable store backed by Firestore.
//!
//! Documents are typed through serde. Timetable entries use a deterministic
//! composite document id derived from the uniqueness triple, and creation
//! uses insert (create-only) semantics, so the duplicate-prevention rule
//! holds even under concurrent creates.

use crate::db::{collections, entry_doc_id, RecordStore};
use crate::error::{AppError, Result};
use crate::models::{TimetableEntry, User, WeekStatus};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Durable record store client.
#[derive(Clone)]
pub struct FirestoreStore {
    client: firestore::FirestoreDb,
}

impl FirestoreStore {
    /// Connect to Firestore.
    ///
    /// For local development with the emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn connect(project_id: &str) -> Result<Self> {
        // If the emulator environment variable is set, use unauthenticated
        // connection to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::connect_emulator(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self { client })
    }

    /// Connect to the emulator with unauthenticated access.
    async fn connect_emulator(project_id: &str) -> Result<Self> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // ExternalJwtFunctionSource provides a dummy token without needing a
        // custom TokenSource implementation struct.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self { client })
    }
}

/// Whether a backend error message indicates a create-only insert lost to an
/// existing document.
fn is_already_exists(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("already exists") || lower.contains("alreadyexists")
}

#[async_trait]
impl RecordStore for FirestoreStore {
    async fn find_user(&self, uid: &str) -> Result<Option<User>> {
        self.client
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(uid)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn save_user(&self, user: &User) -> Result<()> {
        let _: () = self
            .client
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.uid)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn entries_for_week(
        &self,
        user_id: &str,
        week_start: NaiveDate,
    ) -> Result<Vec<TimetableEntry>> {
        let user_id = user_id.to_string();
        let week = week_start.to_string();

        self.client
            .fluent()
            .select()
            .from(collections::TIMETABLE_ENTRIES)
            .filter(move |q| {
                q.for_all([
                    q.field("userId").eq(user_id.clone()),
                    q.field("weekStart").eq(week.clone()),
                ])
            })
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn insert_entry(&self, mut entry: TimetableEntry) -> Result<TimetableEntry> {
        entry.id = entry_doc_id(&entry.user_id, &entry.action, entry.week_start);

        // Create-only semantics: fails if the document already exists, which
        // is the race backstop for the duplicate check done by the service.
        let stored: TimetableEntry = self
            .client
            .fluent()
            .insert()
            .into(collections::TIMETABLE_ENTRIES)
            .document_id(&entry.id)
            .object(&entry)
            .execute()
            .await
            .map_err(|e| {
                let msg = e.to_string();
                if is_already_exists(&msg) {
                    AppError::Duplicate("Action already exists for this week".to_string())
                } else {
                    AppError::Database(msg)
                }
            })?;

        Ok(stored)
    }

    async fn entry_in_week(
        &self,
        id: &str,
        week_start: NaiveDate,
    ) -> Result<Option<TimetableEntry>> {
        let entry: Option<TimetableEntry> = self
            .client
            .fluent()
            .select()
            .by_id_in(collections::TIMETABLE_ENTRIES)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(entry.filter(|e| e.week_start == week_start))
    }

    async fn update_entry_status(
        &self,
        id: &str,
        week_start: NaiveDate,
        status: WeekStatus,
    ) -> Result<Option<TimetableEntry>> {
        // Week-scoped read, then write keyed by document id. A concurrent
        // delete of the same entry collapses to one of the two serial orders.
        let Some(mut entry) = self.entry_in_week(id, week_start).await? else {
            return Ok(None);
        };

        entry.status = status;
        entry.updated_at = chrono::Utc::now();

        let _: () = self
            .client
            .fluent()
            .update()
            .in_col(collections::TIMETABLE_ENTRIES)
            .document_id(&entry.id)
            .object(&entry)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(Some(entry))
    }

    async fn delete_entry_in_week(&self, id: &str, week_start: NaiveDate) -> Result<bool> {
        if self.entry_in_week(id, week_start).await?.is_none() {
            return Ok(false);
        }

        self.client
            .fluent()
            .delete()
            .from(collections::TIMETABLE_ENTRIES)
            .document_id(id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_exists_detection() {
        assert!(is_already_exists("Document already exists: projects/x"));
        assert!(is_already_exists("status: AlreadyExists"));
        assert!(!is_already_exists("deadline exceeded"));
    }
}
