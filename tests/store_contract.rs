// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Consistency-contract tests for the `RecordStore` interface.
//!
//! Run against the volatile store; the guarantees checked here are the ones
//! both backends must provide identically (read-after-write, uniqueness,
//! week scoping).

use chrono::{Days, NaiveDate, Utc};
use weekplan::db::{MemoryStore, RecordStore};
use weekplan::error::AppError;
use weekplan::models::{DayStatus, TimetableEntry, User, WeekStatus};

fn week() -> NaiveDate {
    // A fixed Monday; the contract is week-agnostic
    NaiveDate::from_ymd_opt(2026, 8, 3).unwrap()
}

fn user(uid: &str, name: &str) -> User {
    let now = Utc::now();
    User {
        uid: uid.to_string(),
        name: name.to_string(),
        email: format!("{}@example.com", uid),
        photo_url: String::new(),
        created_at: now,
        updated_at: now,
    }
}

fn entry(user_id: &str, action: &str, week_start: NaiveDate) -> TimetableEntry {
    let now = Utc::now();
    TimetableEntry {
        id: String::new(),
        user_id: user_id.to_string(),
        action: action.to_string(),
        week_start,
        status: WeekStatus::default(),
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn test_user_read_after_write() {
    let store = MemoryStore::new();

    assert!(store.find_user("u1").await.unwrap().is_none());

    store.save_user(&user("u1", "Ann")).await.unwrap();
    let found = store.find_user("u1").await.unwrap().unwrap();
    assert_eq!(found.name, "Ann");
}

#[tokio::test]
async fn test_saving_same_uid_twice_keeps_one_record() {
    let store = MemoryStore::new();

    store.save_user(&user("u1", "Ann")).await.unwrap();
    store.save_user(&user("u1", "Ann2")).await.unwrap();

    let found = store.find_user("u1").await.unwrap().unwrap();
    assert_eq!(found.name, "Ann2");
}

#[tokio::test]
async fn test_insert_assigns_the_composite_id() {
    let store = MemoryStore::new();

    let stored = store.insert_entry(entry("u1", "gym", week())).await.unwrap();
    assert_eq!(stored.id, "u1_gym_2026-08-03");

    // Read-after-write through the week-scoped lookup
    let found = store.entry_in_week(&stored.id, week()).await.unwrap();
    assert!(found.is_some());
}

#[tokio::test]
async fn test_duplicate_triple_is_rejected_and_store_unchanged() {
    let store = MemoryStore::new();

    let first = store.insert_entry(entry("u1", "gym", week())).await.unwrap();

    let err = store
        .insert_entry(entry("u1", "gym", week()))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Duplicate(_)));

    let entries = store.entries_for_week("u1", week()).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].created_at, first.created_at);
}

#[tokio::test]
async fn test_same_action_in_different_weeks_is_allowed() {
    let store = MemoryStore::new();
    let next_week = week() + Days::new(7);

    store.insert_entry(entry("u1", "gym", week())).await.unwrap();
    store
        .insert_entry(entry("u1", "gym", next_week))
        .await
        .unwrap();

    assert_eq!(store.entries_for_week("u1", week()).await.unwrap().len(), 1);
    assert_eq!(
        store.entries_for_week("u1", next_week).await.unwrap().len(),
        1
    );
}

#[tokio::test]
async fn test_listing_filters_by_user_and_week() {
    let store = MemoryStore::new();

    store.insert_entry(entry("u1", "gym", week())).await.unwrap();
    store.insert_entry(entry("u1", "read", week())).await.unwrap();
    store.insert_entry(entry("u2", "gym", week())).await.unwrap();

    let entries = store.entries_for_week("u1", week()).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e.user_id == "u1"));
}

#[tokio::test]
async fn test_update_is_scoped_to_the_given_week() {
    let store = MemoryStore::new();
    let stored = store.insert_entry(entry("u1", "gym", week())).await.unwrap();

    let status = WeekStatus {
        tuesday: Some(DayStatus::No),
        ..WeekStatus::default()
    };

    // Wrong week: the id exists but the guard reports no match
    let missed = store
        .update_entry_status(&stored.id, week() + Days::new(7), status.clone())
        .await
        .unwrap();
    assert!(missed.is_none());

    // Right week: status replaced, updated_at refreshed
    let updated = store
        .update_entry_status(&stored.id, week(), status.clone())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, status);
    assert!(updated.updated_at > stored.updated_at);
    assert_eq!(updated.created_at, stored.created_at);
}

#[tokio::test]
async fn test_delete_is_scoped_to_the_given_week() {
    let store = MemoryStore::new();
    let stored = store.insert_entry(entry("u1", "gym", week())).await.unwrap();

    assert!(!store
        .delete_entry_in_week(&stored.id, week() + Days::new(7))
        .await
        .unwrap());
    assert!(store.delete_entry_in_week(&stored.id, week()).await.unwrap());

    // Gone for good
    assert!(!store.delete_entry_in_week(&stored.id, week()).await.unwrap());
    assert!(store.entry_in_week(&stored.id, week()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_concurrent_creates_admit_exactly_one_entry() {
    let store = MemoryStore::new();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.insert_entry(entry("u1", "gym", week())).await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            successes += 1;
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(store.entries_for_week("u1", week()).await.unwrap().len(), 1);
}
