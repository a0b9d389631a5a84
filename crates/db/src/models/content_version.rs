//! Content version snapshot model and DTOs.

use contentflow_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `content_versions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContentVersion {
    pub id: DbId,
    pub content_piece_id: DbId,
    pub version_number: i32,
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub change_reason: Option<String>,
    pub changed_by: Option<String>,
    pub is_current_version: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for snapshotting a piece. Missing payload fields are taken from the
/// piece's current columns.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateVersion {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub change_reason: Option<String>,
    pub changed_by: Option<String>,
}

/// A fully resolved version payload, ready to insert.
#[derive(Debug, Clone, Default)]
pub struct NewContentVersion {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub change_reason: Option<String>,
    pub changed_by: Option<String>,
}

/// Request body for restoring an older version.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RestoreVersion {
    pub changed_by: Option<String>,
}
