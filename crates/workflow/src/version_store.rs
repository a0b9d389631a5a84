//! Append-only version history of content pieces.
//!
//! Every snapshot is taken while holding the content piece row lock so that
//! version numbers stay gap-free and exactly one version is current.

use contentflow_core::types::DbId;
use contentflow_db::models::content_piece::ContentPiece;
use contentflow_db::models::content_version::{
    ContentVersion, CreateVersion, NewContentVersion, RestoreVersion,
};
use contentflow_db::repositories::{ContentPieceRepo, ContentVersionRepo};
use sqlx::PgPool;

use crate::{WorkflowError, WorkflowResult};

/// Change reason recorded on a piece's first version.
pub const INITIAL_VERSION_REASON: &str = "Initial version";

/// Change reason recorded when an edit changes a piece's text.
pub const UPDATED_VERSION_REASON: &str = "Content updated";

/// Change reason recorded when approval finalizes a selected draft.
pub const APPROVED_VERSION_REASON: &str = "Approved";

/// Snapshot payload taken from a piece's current columns.
pub(crate) fn snapshot_of(
    piece: &ContentPiece,
    change_reason: &str,
    changed_by: Option<String>,
) -> NewContentVersion {
    NewContentVersion {
        title: piece.title.clone(),
        description: piece.description.clone(),
        content: piece.original_content.clone(),
        change_reason: Some(change_reason.to_string()),
        changed_by,
    }
}

/// Version history operations.
pub struct VersionStore;

impl VersionStore {
    /// Append a version and make it current. Fields missing from `input`
    /// are taken from the piece.
    pub async fn create_version(
        pool: &PgPool,
        content_piece_id: DbId,
        input: &CreateVersion,
    ) -> WorkflowResult<ContentVersion> {
        let mut tx = pool.begin().await?;
        let piece = ContentPieceRepo::lock_for_update(&mut tx, content_piece_id)
            .await?
            .ok_or(WorkflowError::not_found("ContentPiece", content_piece_id))?;

        let payload = NewContentVersion {
            title: input.title.clone().or(piece.title),
            description: input.description.clone().or(piece.description),
            content: input.content.clone().or(piece.original_content),
            change_reason: input.change_reason.clone(),
            changed_by: input.changed_by.clone(),
        };
        let version = ContentVersionRepo::create_as_current(&mut tx, content_piece_id, &payload).await?;
        tx.commit().await?;

        tracing::info!(
            content_piece_id,
            version_number = version.version_number,
            "Content version created",
        );
        Ok(version)
    }

    /// All versions of a piece, oldest first.
    pub async fn list_versions(
        pool: &PgPool,
        content_piece_id: DbId,
    ) -> WorkflowResult<Vec<ContentVersion>> {
        ensure_piece_exists(pool, content_piece_id).await?;
        Ok(ContentVersionRepo::list_by_content_piece(pool, content_piece_id).await?)
    }

    /// The current version of a piece, if any version exists.
    pub async fn find_current(
        pool: &PgPool,
        content_piece_id: DbId,
    ) -> WorkflowResult<Option<ContentVersion>> {
        ensure_piece_exists(pool, content_piece_id).await?;
        Ok(ContentVersionRepo::find_current(pool, content_piece_id).await?)
    }

    pub async fn find_version(
        pool: &PgPool,
        content_piece_id: DbId,
        version_number: i32,
    ) -> WorkflowResult<ContentVersion> {
        ContentVersionRepo::find_by_number(pool, content_piece_id, version_number)
            .await?
            .ok_or(WorkflowError::not_found(
                "ContentVersion",
                DbId::from(version_number),
            ))
    }

    /// Bring back an older version's text.
    ///
    /// Writes the old payload back onto the piece and appends it as a new
    /// current version. Nothing is deleted or renumbered.
    pub async fn restore_version(
        pool: &PgPool,
        content_piece_id: DbId,
        version_number: i32,
        input: &RestoreVersion,
    ) -> WorkflowResult<ContentVersion> {
        let mut tx = pool.begin().await?;
        ContentPieceRepo::lock_for_update(&mut tx, content_piece_id)
            .await?
            .ok_or(WorkflowError::not_found("ContentPiece", content_piece_id))?;

        let old = ContentVersionRepo::find_by_number_in_tx(&mut tx, content_piece_id, version_number)
            .await?
            .ok_or(WorkflowError::not_found(
                "ContentVersion",
                DbId::from(version_number),
            ))?;

        ContentPieceRepo::set_text(
            &mut tx,
            content_piece_id,
            old.title.as_deref(),
            old.description.as_deref(),
            old.content.as_deref(),
        )
        .await?;

        let payload = NewContentVersion {
            title: old.title,
            description: old.description,
            content: old.content,
            change_reason: Some(format!("Restored from version {version_number}")),
            changed_by: input.changed_by.clone(),
        };
        let version = ContentVersionRepo::create_as_current(&mut tx, content_piece_id, &payload).await?;
        tx.commit().await?;

        tracing::info!(
            content_piece_id,
            restored_from = version_number,
            version_number = version.version_number,
            "Content version restored",
        );
        Ok(version)
    }
}

pub(crate) async fn ensure_piece_exists(pool: &PgPool, id: DbId) -> WorkflowResult<ContentPiece> {
    ContentPieceRepo::find_by_id(pool, id)
        .await?
        .ok_or(WorkflowError::not_found("ContentPiece", id))
}
