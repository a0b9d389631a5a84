//! Repository for the `content_pieces` table.
//!
//! Every write touches only the columns it names. Child rows (drafts,
//! reviews, versions, translations) are written through their own
//! repositories.

use contentflow_core::review::ReviewState;
use contentflow_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::content_piece::{ContentPiece, CreateContentPiece, UpdateContentPiece};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, campaign_id, content_type, source_language, target_language, \
    review_state, priority, title, description, original_content, final_text, \
    translation_of, published_at, created_at, updated_at";

/// Provides CRUD and narrow column updates for content pieces.
pub struct ContentPieceRepo;

impl ContentPieceRepo {
    /// Insert a new piece in the `draft` state.
    ///
    /// `translation_of` is only set by the translation path, after the
    /// source piece has passed the translation gate.
    pub async fn create(
        tx: &mut Transaction<'_, Postgres>,
        input: &CreateContentPiece,
        translation_of: Option<DbId>,
    ) -> Result<ContentPiece, sqlx::Error> {
        let query = format!(
            "INSERT INTO content_pieces
                (campaign_id, content_type, source_language, target_language, review_state,
                 priority, title, description, original_content, translation_of)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentPiece>(&query)
            .bind(input.campaign_id)
            .bind(input.content_type.as_str())
            .bind(&input.source_language)
            .bind(&input.target_language)
            .bind(ReviewState::Draft.as_str())
            .bind(input.priority.unwrap_or_default().as_str())
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.original_content)
            .bind(translation_of)
            .fetch_one(&mut **tx)
            .await
    }

    /// Find a content piece by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ContentPiece>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM content_pieces WHERE id = $1");
        sqlx::query_as::<_, ContentPiece>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Read a piece and hold its row lock until the transaction ends.
    ///
    /// Serializes concurrent transitions, draft selections and version
    /// creations for the same piece.
    pub async fn lock_for_update(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
    ) -> Result<Option<ContentPiece>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM content_pieces WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, ContentPiece>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Apply the editable fields of `input`. Only non-`None` fields change.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        input: &UpdateContentPiece,
    ) -> Result<Option<ContentPiece>, sqlx::Error> {
        let query = format!(
            "UPDATE content_pieces SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                original_content = COALESCE($4, original_content),
                priority = COALESCE($5, priority),
                target_language = COALESCE($6, target_language)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentPiece>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.original_content)
            .bind(input.priority.map(|p| p.as_str()))
            .bind(&input.target_language)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Overwrite the versioned text columns, e.g. when restoring a version.
    pub async fn set_text(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        title: Option<&str>,
        description: Option<&str>,
        original_content: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE content_pieces SET title = $2, description = $3, original_content = $4 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(original_content)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Update only the `review_state` column.
    pub async fn set_review_state(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        state: ReviewState,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE content_pieces SET review_state = $2 WHERE id = $1")
            .bind(id)
            .bind(state.as_str())
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Stamp `published_at` with the transaction time.
    pub async fn mark_published(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE content_pieces SET published_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Update only the `final_text` column.
    pub async fn set_final_text(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        final_text: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE content_pieces SET final_text = $2 WHERE id = $1")
            .bind(id)
            .bind(final_text)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// List the materialized translations of a piece, oldest first.
    pub async fn list_translations_of(
        pool: &PgPool,
        source_id: DbId,
    ) -> Result<Vec<ContentPiece>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM content_pieces
             WHERE translation_of = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, ContentPiece>(&query)
            .bind(source_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a piece and, by cascade, everything it owns.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM content_pieces WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
