//! Repository for the `content_versions` table.
//!
//! Versions are append-only. The only column ever updated after insert is
//! `is_current_version`, which moves to the newest snapshot.

use contentflow_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::content_version::{ContentVersion, NewContentVersion};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, content_piece_id, version_number, title, description, content, \
    change_reason, changed_by, is_current_version, created_at, updated_at";

/// Provides append and lookup for content versions.
pub struct ContentVersionRepo;

impl ContentVersionRepo {
    /// Append a version and make it current.
    ///
    /// The caller must hold the content piece row lock (see
    /// `ContentPieceRepo::lock_for_update`) so that the `MAX + 1` read and the
    /// insert cannot interleave with another writer.
    pub async fn create_as_current(
        tx: &mut Transaction<'_, Postgres>,
        content_piece_id: DbId,
        input: &NewContentVersion,
    ) -> Result<ContentVersion, sqlx::Error> {
        let next: (i32,) = sqlx::query_as(
            "SELECT COALESCE(MAX(version_number), 0) + 1 \
             FROM content_versions WHERE content_piece_id = $1",
        )
        .bind(content_piece_id)
        .fetch_one(&mut **tx)
        .await?;

        sqlx::query(
            "UPDATE content_versions SET is_current_version = false \
             WHERE content_piece_id = $1 AND is_current_version = true",
        )
        .bind(content_piece_id)
        .execute(&mut **tx)
        .await?;

        let query = format!(
            "INSERT INTO content_versions
                (content_piece_id, version_number, title, description, content,
                 change_reason, changed_by, is_current_version)
             VALUES ($1, $2, $3, $4, $5, $6, $7, true)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentVersion>(&query)
            .bind(content_piece_id)
            .bind(next.0)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.content)
            .bind(&input.change_reason)
            .bind(&input.changed_by)
            .fetch_one(&mut **tx)
            .await
    }

    /// List every version of a piece, oldest first.
    pub async fn list_by_content_piece(
        pool: &PgPool,
        content_piece_id: DbId,
    ) -> Result<Vec<ContentVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM content_versions
             WHERE content_piece_id = $1
             ORDER BY version_number ASC"
        );
        sqlx::query_as::<_, ContentVersion>(&query)
            .bind(content_piece_id)
            .fetch_all(pool)
            .await
    }

    /// Find the current version of a piece (if any).
    pub async fn find_current(
        pool: &PgPool,
        content_piece_id: DbId,
    ) -> Result<Option<ContentVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM content_versions \
             WHERE content_piece_id = $1 AND is_current_version = true"
        );
        sqlx::query_as::<_, ContentVersion>(&query)
            .bind(content_piece_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a specific version of a piece by number.
    pub async fn find_by_number(
        pool: &PgPool,
        content_piece_id: DbId,
        version_number: i32,
    ) -> Result<Option<ContentVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM content_versions \
             WHERE content_piece_id = $1 AND version_number = $2"
        );
        sqlx::query_as::<_, ContentVersion>(&query)
            .bind(content_piece_id)
            .bind(version_number)
            .fetch_optional(pool)
            .await
    }

    /// Same as [`Self::find_by_number`] but reads inside a running transaction.
    pub async fn find_by_number_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        content_piece_id: DbId,
        version_number: i32,
    ) -> Result<Option<ContentVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM content_versions \
             WHERE content_piece_id = $1 AND version_number = $2"
        );
        sqlx::query_as::<_, ContentVersion>(&query)
            .bind(content_piece_id)
            .bind(version_number)
            .fetch_optional(&mut **tx)
            .await
    }
}
