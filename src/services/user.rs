// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User service: upsert-by-identifier and lookup-by-identifier over the
//! selected store.

use crate::db::Storage;
use crate::error::{AppError, Result};
use crate::models::User;
use std::sync::Arc;

/// Fields accepted by an upsert.
#[derive(Debug, Clone)]
pub struct UpsertUser {
    pub uid: String,
    pub name: String,
    pub email: String,
    pub photo_url: String,
}

#[derive(Clone)]
pub struct UserService {
    storage: Arc<Storage>,
}

impl UserService {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    /// Create the user on first call for a uid, overwrite profile fields on
    /// subsequent calls. `created_at` is set once; `updated_at` refreshes on
    /// every upsert.
    pub async fn upsert(&self, fields: UpsertUser) -> Result<User> {
        if fields.uid.is_empty() {
            return Err(AppError::Validation("uid is required".to_string()));
        }

        let store = self.storage.active();
        let now = chrono::Utc::now();

        let user = match store.find_user(&fields.uid).await? {
            Some(mut existing) => {
                existing.name = fields.name;
                existing.email = fields.email;
                existing.photo_url = fields.photo_url;
                existing.updated_at = now;
                existing
            }
            None => User {
                uid: fields.uid,
                name: fields.name,
                email: fields.email,
                photo_url: fields.photo_url,
                created_at: now,
                updated_at: now,
            },
        };

        store.save_user(&user).await?;
        tracing::info!(uid = %user.uid, "User saved");

        Ok(user)
    }

    /// Look up a user by uid.
    pub async fn get(&self, uid: &str) -> Result<User> {
        self.storage
            .active()
            .find_user(uid)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
