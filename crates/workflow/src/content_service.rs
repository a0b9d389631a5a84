//! Content piece lifecycle outside of review: create, edit, read, delete.

use contentflow_core::content::{validate_body, validate_language_code};
use contentflow_core::error::CoreError;
use contentflow_core::types::DbId;
use contentflow_db::models::campaign::{Campaign, CreateCampaign};
use contentflow_db::models::content_piece::{ContentPiece, CreateContentPiece, UpdateContentPiece};
use contentflow_db::repositories::{CampaignRepo, ContentPieceRepo, ContentVersionRepo};
use sqlx::PgPool;

use crate::version_store::{snapshot_of, INITIAL_VERSION_REASON, UPDATED_VERSION_REASON};
use crate::{validate_input, WorkflowError, WorkflowResult};

pub struct ContentService;

impl ContentService {
    /// Create the campaign that owns content pieces.
    pub async fn create_campaign(pool: &PgPool, input: &CreateCampaign) -> WorkflowResult<Campaign> {
        if input.name.trim().is_empty() {
            return Err(
                CoreError::Validation("Campaign name must not be empty".to_string()).into(),
            );
        }
        let campaign = CampaignRepo::create(pool, input).await?;
        tracing::info!(campaign_id = campaign.id, "Campaign created");
        Ok(campaign)
    }

    /// Create a piece in `draft` together with its version 1.
    pub async fn create_content_piece(
        pool: &PgPool,
        input: &CreateContentPiece,
    ) -> WorkflowResult<ContentPiece> {
        validate_input(input)?;
        validate_language_code(&input.source_language)?;
        if let Some(target) = input.target_language.as_deref() {
            validate_language_code(target)?;
        }
        validate_body(input.original_content.as_deref())?;

        CampaignRepo::find_by_id(pool, input.campaign_id)
            .await?
            .ok_or(WorkflowError::not_found("Campaign", input.campaign_id))?;

        let mut tx = pool.begin().await?;
        let piece = ContentPieceRepo::create(&mut tx, input, None).await?;
        ContentVersionRepo::create_as_current(
            &mut tx,
            piece.id,
            &snapshot_of(&piece, INITIAL_VERSION_REASON, input.created_by.clone()),
        )
        .await?;
        tx.commit().await?;

        tracing::info!(
            content_piece_id = piece.id,
            campaign_id = piece.campaign_id,
            content_type = %piece.content_type,
            "Content piece created",
        );
        Ok(piece)
    }

    /// Apply an edit. A new version is appended only when title, description
    /// or body actually change.
    pub async fn update_content_piece(
        pool: &PgPool,
        id: DbId,
        input: &UpdateContentPiece,
    ) -> WorkflowResult<ContentPiece> {
        validate_input(input)?;
        if let Some(target) = input.target_language.as_deref() {
            validate_language_code(target)?;
        }
        validate_body(input.original_content.as_deref())?;

        let mut tx = pool.begin().await?;
        let before = ContentPieceRepo::lock_for_update(&mut tx, id)
            .await?
            .ok_or(WorkflowError::not_found("ContentPiece", id))?;
        let text_changed = input.changes_text_of(&before);

        let piece = ContentPieceRepo::update(&mut tx, id, input)
            .await?
            .ok_or(WorkflowError::not_found("ContentPiece", id))?;

        if text_changed {
            let reason = input
                .change_reason
                .as_deref()
                .unwrap_or(UPDATED_VERSION_REASON);
            ContentVersionRepo::create_as_current(
                &mut tx,
                id,
                &snapshot_of(&piece, reason, input.changed_by.clone()),
            )
            .await?;
        }
        tx.commit().await?;

        tracing::info!(content_piece_id = id, text_changed, "Content piece updated");
        Ok(piece)
    }

    pub async fn get_content_piece(pool: &PgPool, id: DbId) -> WorkflowResult<ContentPiece> {
        tracing::debug!(content_piece_id = id, "Loading content piece");
        ContentPieceRepo::find_by_id(pool, id)
            .await?
            .ok_or(WorkflowError::not_found("ContentPiece", id))
    }

    /// Delete a piece with its drafts, reviews, versions and translations.
    pub async fn delete_content_piece(pool: &PgPool, id: DbId) -> WorkflowResult<()> {
        if !ContentPieceRepo::delete(pool, id).await? {
            return Err(WorkflowError::not_found("ContentPiece", id));
        }
        tracing::info!(content_piece_id = id, "Content piece deleted");
        Ok(())
    }
}
