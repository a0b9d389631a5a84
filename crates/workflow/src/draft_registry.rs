//! AI draft candidates per content piece, with at most one selected.

use contentflow_core::draft::{
    validate_generation_params, validate_quality_score, validate_rating,
};
use contentflow_core::quality::{self, AiMetadata};
use contentflow_core::types::DbId;
use contentflow_db::models::ai_draft::{AiDraft, CreateDraft, DraftMetrics};
use contentflow_db::models::content_piece::ContentPiece;
use contentflow_db::repositories::AiDraftRepo;
use sqlx::PgPool;

use crate::version_store::ensure_piece_exists;
use crate::{validate_input, WorkflowError, WorkflowResult};

pub struct DraftRegistry;

impl DraftRegistry {
    /// Record a generation attempt.
    ///
    /// Without a caller-supplied score, one is derived from the piece body
    /// and the draft body when the piece has body text.
    pub async fn create_draft(pool: &PgPool, input: &CreateDraft) -> WorkflowResult<AiDraft> {
        validate_input(input)?;
        validate_generation_params(input.temperature, input.max_tokens)?;
        if let Some(score) = input.quality_score {
            validate_quality_score(score)?;
        }

        let piece = ensure_piece_exists(pool, input.content_piece_id).await?;
        let quality_score = input.quality_score.or_else(|| derived_score(&piece, input));

        let draft = if input.select {
            AiDraftRepo::create_as_selected(pool, input, quality_score).await?
        } else {
            AiDraftRepo::create(pool, input, quality_score).await?
        };

        tracing::info!(
            draft_id = draft.id,
            content_piece_id = draft.content_piece_id,
            status = %draft.status,
            quality_score = ?draft.quality_score,
            "AI draft created",
        );
        Ok(draft)
    }

    /// Make `draft_id` the selected draft of its piece.
    pub async fn select_draft(pool: &PgPool, draft_id: DbId) -> WorkflowResult<AiDraft> {
        let draft = find_draft(pool, draft_id).await?;
        let previous_status = draft.draft_status()?;
        let selected = AiDraftRepo::select(pool, draft.content_piece_id, draft_id)
            .await?
            .ok_or(WorkflowError::not_found("AiDraft", draft_id))?;

        tracing::info!(
            draft_id,
            content_piece_id = selected.content_piece_id,
            previous_status = %previous_status,
            "AI draft selected",
        );
        Ok(selected)
    }

    pub async fn discard_draft(pool: &PgPool, draft_id: DbId) -> WorkflowResult<AiDraft> {
        let draft = AiDraftRepo::discard(pool, draft_id)
            .await?
            .ok_or(WorkflowError::not_found("AiDraft", draft_id))?;
        tracing::info!(draft_id, content_piece_id = draft.content_piece_id, "AI draft discarded");
        Ok(draft)
    }

    /// Record a 1-5 human rating.
    pub async fn rate_draft(pool: &PgPool, draft_id: DbId, rating: i16) -> WorkflowResult<AiDraft> {
        validate_rating(rating)?;
        let draft = AiDraftRepo::set_rating(pool, draft_id, rating)
            .await?
            .ok_or(WorkflowError::not_found("AiDraft", draft_id))?;
        tracing::info!(draft_id, rating, "AI draft rated");
        Ok(draft)
    }

    pub async fn list_drafts(pool: &PgPool, content_piece_id: DbId) -> WorkflowResult<Vec<AiDraft>> {
        ensure_piece_exists(pool, content_piece_id).await?;
        Ok(AiDraftRepo::list_by_content_piece(pool, content_piece_id).await?)
    }

    pub async fn find_selected(
        pool: &PgPool,
        content_piece_id: DbId,
    ) -> WorkflowResult<Option<AiDraft>> {
        ensure_piece_exists(pool, content_piece_id).await?;
        Ok(AiDraftRepo::find_selected(pool, content_piece_id).await?)
    }

    pub async fn metrics(pool: &PgPool, content_piece_id: DbId) -> WorkflowResult<DraftMetrics> {
        ensure_piece_exists(pool, content_piece_id).await?;
        Ok(AiDraftRepo::metrics(pool, content_piece_id).await?)
    }
}

async fn find_draft(pool: &PgPool, draft_id: DbId) -> WorkflowResult<AiDraft> {
    AiDraftRepo::find_by_id(pool, draft_id)
        .await?
        .ok_or(WorkflowError::not_found("AiDraft", draft_id))
}

fn derived_score(piece: &ContentPiece, input: &CreateDraft) -> Option<f64> {
    let source = piece
        .original_content
        .as_deref()
        .filter(|body| !body.trim().is_empty())?;
    let metadata = AiMetadata {
        confidence_score: input.confidence_score,
        ..Default::default()
    };
    Some(quality::score(
        source,
        input.content.body.as_deref().unwrap_or_default(),
        Some(&metadata),
    ))
}
