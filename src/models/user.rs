//! User model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User profile record.
///
/// Keyed by `uid` (externally assigned); there is at most one User per uid in
/// a given backend. Users are created or overwritten by upsert and never
/// deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// External user identifier (also used as document ID)
    pub uid: String,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Profile picture URL (empty when not set)
    #[serde(rename = "photoURL", default)]
    pub photo_url: String,
    /// When the user was first stored
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// Refreshed on every upsert
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}
