//! Repository for the `translations` table.

use contentflow_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::translation::{NewTranslation, Translation};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, content_piece_id, translated_content_piece_id, source_language, \
    target_language, title, description, content, model_used, quality_score, \
    human_reviewed, created_at, updated_at";

/// Provides CRUD operations for translations.
pub struct TranslationRepo;

impl TranslationRepo {
    /// Insert a translation inside the transaction that checked the gate.
    pub async fn create(
        tx: &mut Transaction<'_, Postgres>,
        input: &NewTranslation<'_>,
    ) -> Result<Translation, sqlx::Error> {
        let query = format!(
            "INSERT INTO translations
                (content_piece_id, translated_content_piece_id, source_language,
                 target_language, title, description, content, model_used, quality_score)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Translation>(&query)
            .bind(input.content_piece_id)
            .bind(input.translated_content_piece_id)
            .bind(input.source_language)
            .bind(&input.input.target_language)
            .bind(&input.input.title)
            .bind(&input.input.description)
            .bind(&input.input.content)
            .bind(&input.input.model_used)
            .bind(input.quality_score)
            .fetch_one(&mut **tx)
            .await
    }

    /// Find a translation by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Translation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM translations WHERE id = $1");
        sqlx::query_as::<_, Translation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List translations of a piece, oldest first.
    pub async fn list_by_content_piece(
        pool: &PgPool,
        content_piece_id: DbId,
    ) -> Result<Vec<Translation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM translations
             WHERE content_piece_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Translation>(&query)
            .bind(content_piece_id)
            .fetch_all(pool)
            .await
    }

    /// Flag a translation as checked by a human.
    pub async fn mark_human_reviewed(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Translation>, sqlx::Error> {
        let query = format!(
            "UPDATE translations SET human_reviewed = true WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Translation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
