// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User routes.

use crate::error::Result;
use crate::models::User;
use crate::services::UpsertUser;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users", post(save_user))
        .route("/api/users/{uid}", get(get_user))
}

/// Request body for save-or-update.
#[derive(Deserialize)]
struct SaveUserRequest {
    uid: String,
    name: String,
    email: String,
    #[serde(rename = "photoURL", default)]
    photo_url: String,
}

/// Save or update a user. Creation and update share one success code.
async fn save_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SaveUserRequest>,
) -> Result<Json<User>> {
    let user = state
        .users
        .upsert(UpsertUser {
            uid: body.uid,
            name: body.name,
            email: body.email,
            photo_url: body.photo_url,
        })
        .await?;

    Ok(Json(user))
}

/// Get a user by uid.
async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(uid): Path<String>,
) -> Result<Json<User>> {
    let user = state.users.get(&uid).await?;
    Ok(Json(user))
}
