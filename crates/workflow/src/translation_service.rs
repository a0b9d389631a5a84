//! Translations of approved content.
//!
//! The gate is checked while the source row is locked, so a piece cannot
//! leave `approved` between the check and the insert.

use contentflow_core::content::validate_language_code;
use contentflow_core::quality;
use contentflow_core::translation_gate::{can_translate, ensure_can_translate};
use contentflow_core::types::DbId;
use contentflow_db::models::content_piece::{ContentPiece, CreateContentPiece};
use contentflow_db::models::translation::{CreateTranslation, NewTranslation, Translation};
use contentflow_db::repositories::{ContentPieceRepo, ContentVersionRepo, TranslationRepo};
use sqlx::{PgPool, Postgres, Transaction};

use crate::version_store::{ensure_piece_exists, snapshot_of, INITIAL_VERSION_REASON};
use crate::{validate_input, WorkflowError, WorkflowResult};

pub struct TranslationService;

impl TranslationService {
    /// Whether the piece is currently translatable.
    pub async fn can_translate(pool: &PgPool, content_piece_id: DbId) -> WorkflowResult<bool> {
        let piece = ensure_piece_exists(pool, content_piece_id).await?;
        Ok(can_translate(piece.state()?))
    }

    /// Record a translation of an approved piece, scored against its text.
    pub async fn create_translation(
        pool: &PgPool,
        content_piece_id: DbId,
        input: &CreateTranslation,
    ) -> WorkflowResult<Translation> {
        validate_input(input)?;
        validate_language_code(&input.target_language)?;

        let mut tx = pool.begin().await?;
        let source = ContentPieceRepo::lock_for_update(&mut tx, content_piece_id)
            .await?
            .ok_or(WorkflowError::not_found("ContentPiece", content_piece_id))?;

        let state = source.state()?;
        if let Err(e) = ensure_can_translate(state) {
            tracing::warn!(
                content_piece_id,
                review_state = %state,
                "Translation refused for unapproved content",
            );
            return Err(e.into());
        }

        let quality_score = quality::score(
            source.source_text(),
            &input.content,
            input.ai_metadata.as_ref(),
        );

        let translated_content_piece_id = if input.materialize {
            Some(materialize(&mut tx, &source, input).await?.id)
        } else {
            None
        };

        let translation = TranslationRepo::create(
            &mut tx,
            &NewTranslation {
                content_piece_id,
                translated_content_piece_id,
                source_language: &source.source_language,
                input,
                quality_score,
            },
        )
        .await?;
        tx.commit().await?;

        tracing::info!(
            content_piece_id,
            translation_id = translation.id,
            target_language = %translation.target_language,
            quality_score,
            "Translation created",
        );
        Ok(translation)
    }

    pub async fn list_translations(
        pool: &PgPool,
        content_piece_id: DbId,
    ) -> WorkflowResult<Vec<Translation>> {
        ensure_piece_exists(pool, content_piece_id).await?;
        Ok(TranslationRepo::list_by_content_piece(pool, content_piece_id).await?)
    }

    /// Content pieces materialized from translations of this piece.
    pub async fn list_translated_pieces(
        pool: &PgPool,
        content_piece_id: DbId,
    ) -> WorkflowResult<Vec<ContentPiece>> {
        ensure_piece_exists(pool, content_piece_id).await?;
        Ok(ContentPieceRepo::list_translations_of(pool, content_piece_id).await?)
    }

    pub async fn mark_human_reviewed(
        pool: &PgPool,
        translation_id: DbId,
    ) -> WorkflowResult<Translation> {
        let translation = TranslationRepo::mark_human_reviewed(pool, translation_id)
            .await?
            .ok_or(WorkflowError::not_found("Translation", translation_id))?;
        tracing::info!(translation_id, "Translation marked as human reviewed");
        Ok(translation)
    }
}

/// Create the sibling piece that carries the translated text.
async fn materialize(
    tx: &mut Transaction<'_, Postgres>,
    source: &ContentPiece,
    input: &CreateTranslation,
) -> WorkflowResult<ContentPiece> {
    let sibling = CreateContentPiece {
        campaign_id: source.campaign_id,
        content_type: source.kind()?,
        source_language: input.target_language.clone(),
        target_language: None,
        priority: Some(source.priority_level()),
        title: input.title.clone(),
        description: input.description.clone(),
        original_content: Some(input.content.clone()),
        created_by: None,
    };
    let piece = ContentPieceRepo::create(tx, &sibling, Some(source.id)).await?;
    let initial = snapshot_of(&piece, INITIAL_VERSION_REASON, None);
    ContentVersionRepo::create_as_current(tx, piece.id, &initial).await?;

    tracing::debug!(
        content_piece_id = source.id,
        translated_content_piece_id = piece.id,
        "Translated content piece materialized",
    );
    Ok(piece)
}
