// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Timetable routes.

use crate::error::Result;
use crate::models::{TimetableEntry, WeekStatus};
use crate::services::timetable::DELETED_MESSAGE;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    // The path parameter is a userId for GET and an entry id for PUT/DELETE.
    Router::new().route("/api/timetable", post(add_entry)).route(
        "/api/timetable/{id}",
        get(get_entries).put(update_entry).delete(delete_entry),
    )
}

/// Get all of a user's entries for the current week.
async fn get_entries(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<TimetableEntry>>> {
    let entries = state.timetable.list_current_week(&user_id).await?;
    Ok(Json(entries))
}

/// Request body for creating an entry.
#[derive(Deserialize)]
struct AddEntryRequest {
    #[serde(rename = "userId")]
    user_id: String,
    action: String,
    #[serde(default)]
    status: WeekStatus,
}

/// Add a new entry for the current week.
async fn add_entry(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AddEntryRequest>,
) -> Result<(StatusCode, Json<TimetableEntry>)> {
    let entry = state
        .timetable
        .create(body.user_id, body.action, body.status)
        .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// Request body for updating an entry's status.
#[derive(Deserialize)]
struct UpdateEntryRequest {
    status: WeekStatus,
}

/// Replace an entry's status (current week only).
async fn update_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<UpdateEntryRequest>,
) -> Result<Json<TimetableEntry>> {
    let entry = state.timetable.update(&id, body.status).await?;
    Ok(Json(entry))
}

/// Response for a successful delete.
#[derive(Serialize)]
struct DeleteResponse {
    message: String,
}

/// Delete an entry (current week only).
async fn delete_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    state.timetable.delete(&id).await?;
    Ok(Json(DeleteResponse {
        message: DELETED_MESSAGE.to_string(),
    }))
}
