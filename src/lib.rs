// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Weekplan: weekly timetable record service
//!
//! This crate provides the backend API for storing user profiles and
//! per-week timetable entries, with automatic fallback from the durable
//! document store to in-process storage when the store is unreachable.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Storage;
use services::{TimetableService, UserService};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub storage: Arc<Storage>,
    pub users: UserService,
    pub timetable: TimetableService,
}

impl AppState {
    /// Wire services around a backend selector.
    pub fn new(config: Config, storage: Storage) -> Self {
        let storage = Arc::new(storage);
        Self {
            config,
            users: UserService::new(storage.clone()),
            timetable: TimetableService::new(storage.clone()),
            storage,
        }
    }
}
