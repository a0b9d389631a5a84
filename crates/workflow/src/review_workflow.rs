//! Review state machine over stored content pieces.
//!
//! A transition locks the piece row, checks the transition table, writes
//! exactly one `reviews` row and narrows its update to `review_state`.
//! Approval additionally publishes the piece and, when a draft is selected,
//! turns that draft into the piece's final text and a new version. All of
//! it commits together or not at all.

use contentflow_core::audit::{verify_review_chain, ReviewStep};
use contentflow_core::content::compose_final_text;
use contentflow_core::review::{
    require_reviewer, validate_comment, validate_rejection_reason, validate_transition,
    ReviewAction, ReviewState, ReviewType, Reviewer,
};
use contentflow_core::types::DbId;
use contentflow_db::models::content_piece::ContentPiece;
use contentflow_db::models::content_version::NewContentVersion;
use contentflow_db::models::review::{
    ApproveRequest, NewReview, RejectRequest, Review, SubmitRequest, TransitionRequest,
};
use contentflow_db::repositories::{
    AiDraftRepo, ContentPieceRepo, ContentVersionRepo, ReviewRepo,
};
use sqlx::{PgPool, Postgres, Transaction};

use crate::version_store::{ensure_piece_exists, APPROVED_VERSION_REASON};
use crate::{WorkflowError, WorkflowResult};

// ---------------------------------------------------------------------------
// Internal transition request
// ---------------------------------------------------------------------------

struct Transition<'a> {
    new_state: ReviewState,
    review_type: ReviewType,
    action: ReviewAction,
    comments: Option<&'a str>,
    suggestions: Option<&'a str>,
    edited_content: Option<&'a serde_json::Value>,
    reviewer: &'a Reviewer,
    publish_immediately: bool,
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

pub struct ReviewWorkflow;

impl ReviewWorkflow {
    /// Move a piece to `req.new_state` on behalf of `req.reviewer`.
    pub async fn transition(
        pool: &PgPool,
        content_piece_id: DbId,
        req: &TransitionRequest,
    ) -> WorkflowResult<ContentPiece> {
        let reviewer = require_reviewer(req.reviewer.as_ref())?;
        apply(
            pool,
            content_piece_id,
            Transition {
                new_state: req.new_state,
                review_type: req.review_type,
                action: req.action,
                comments: req.comments.as_deref(),
                suggestions: req.suggestions.as_deref(),
                edited_content: req.edited_content.as_ref(),
                reviewer,
                publish_immediately: true,
            },
        )
        .await
    }

    /// Sign a piece off. Publishes immediately unless told otherwise.
    pub async fn approve(
        pool: &PgPool,
        content_piece_id: DbId,
        req: &ApproveRequest,
    ) -> WorkflowResult<ContentPiece> {
        let reviewer = require_reviewer(req.reviewer.as_ref())?;
        apply(
            pool,
            content_piece_id,
            Transition {
                new_state: ReviewState::Approved,
                review_type: ReviewType::FinalApproval,
                action: ReviewAction::Approve,
                comments: req.comments.as_deref(),
                suggestions: None,
                edited_content: None,
                reviewer,
                publish_immediately: req.publish_immediately.unwrap_or(true),
            },
        )
        .await
    }

    /// Send a piece back with a reason.
    pub async fn reject(
        pool: &PgPool,
        content_piece_id: DbId,
        req: &RejectRequest,
    ) -> WorkflowResult<ContentPiece> {
        let reviewer = require_reviewer(req.reviewer.as_ref())?;
        validate_rejection_reason(&req.reason)?;
        apply(
            pool,
            content_piece_id,
            Transition {
                new_state: ReviewState::Rejected,
                review_type: ReviewType::Content,
                action: ReviewAction::Reject,
                comments: Some(&req.reason),
                suggestions: req.suggestions.as_deref(),
                edited_content: None,
                reviewer,
                publish_immediately: false,
            },
        )
        .await
    }

    /// Queue a piece for human review. Recorded against the system reviewer.
    pub async fn submit_for_review(
        pool: &PgPool,
        content_piece_id: DbId,
        req: &SubmitRequest,
    ) -> WorkflowResult<ContentPiece> {
        let system = Reviewer::system();
        apply(
            pool,
            content_piece_id,
            Transition {
                new_state: ReviewState::PendingReview,
                review_type: ReviewType::Content,
                action: ReviewAction::Edit,
                comments: req.comments.as_deref(),
                suggestions: None,
                edited_content: None,
                reviewer: &system,
                publish_immediately: false,
            },
        )
        .await
    }

    /// The audit trail of a piece, in the order it was written.
    pub async fn list_reviews(pool: &PgPool, content_piece_id: DbId) -> WorkflowResult<Vec<Review>> {
        ensure_piece_exists(pool, content_piece_id).await?;
        Ok(ReviewRepo::list_by_content_piece(pool, content_piece_id).await?)
    }

    /// Check that the audit trail replays to the piece's current state.
    pub async fn verify_history(pool: &PgPool, content_piece_id: DbId) -> WorkflowResult<()> {
        let piece = ensure_piece_exists(pool, content_piece_id).await?;
        let reviews = ReviewRepo::list_by_content_piece(pool, content_piece_id).await?;
        let steps = reviews
            .iter()
            .map(Review::step)
            .collect::<Result<Vec<ReviewStep>, _>>()?;
        verify_review_chain(&steps, piece.state()?)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Transition core
// ---------------------------------------------------------------------------

async fn apply(
    pool: &PgPool,
    content_piece_id: DbId,
    t: Transition<'_>,
) -> WorkflowResult<ContentPiece> {
    validate_comment("Comments", t.comments)?;
    validate_comment("Suggestions", t.suggestions)?;

    let mut tx = pool.begin().await?;
    let piece = ContentPieceRepo::lock_for_update(&mut tx, content_piece_id)
        .await?
        .ok_or(WorkflowError::not_found("ContentPiece", content_piece_id))?;
    let from = piece.state()?;

    if let Err(e) = validate_transition(from, t.new_state, t.action) {
        tracing::warn!(
            content_piece_id,
            from = %from,
            to = %t.new_state,
            action = %t.action,
            "Refused review transition",
        );
        return Err(e.into());
    }

    ReviewRepo::create(
        &mut tx,
        &NewReview {
            content_piece_id,
            review_type: t.review_type,
            action: t.action,
            previous_state: from,
            new_state: t.new_state,
            comments: t.comments,
            suggestions: t.suggestions,
            edited_content: t.edited_content,
            reviewer: t.reviewer,
        },
    )
    .await?;
    ContentPieceRepo::set_review_state(&mut tx, content_piece_id, t.new_state).await?;

    if t.new_state == ReviewState::Approved {
        finalize_approval(&mut tx, &piece, t.reviewer, t.publish_immediately).await?;
    }
    tx.commit().await?;

    tracing::info!(
        content_piece_id,
        from = %from,
        to = %t.new_state,
        reviewer_id = %t.reviewer.id,
        "Review transition applied",
    );

    ContentPieceRepo::find_by_id(pool, content_piece_id)
        .await?
        .ok_or(WorkflowError::not_found("ContentPiece", content_piece_id))
}

/// Approval side effects, inside the transition's transaction.
async fn finalize_approval(
    tx: &mut Transaction<'_, Postgres>,
    piece: &ContentPiece,
    reviewer: &Reviewer,
    publish_immediately: bool,
) -> WorkflowResult<()> {
    if publish_immediately {
        ContentPieceRepo::mark_published(tx, piece.id).await?;
    }

    let Some(draft) = AiDraftRepo::find_selected_in_tx(tx, piece.id).await? else {
        return Ok(());
    };

    let final_text = compose_final_text(
        draft.title.as_deref(),
        draft.description.as_deref(),
        draft.body.as_deref(),
    );
    ContentPieceRepo::set_final_text(tx, piece.id, &final_text).await?;

    let payload = NewContentVersion {
        title: draft.title.or_else(|| piece.title.clone()),
        description: draft.description.or_else(|| piece.description.clone()),
        content: draft.body.or_else(|| piece.original_content.clone()),
        change_reason: Some(APPROVED_VERSION_REASON.to_string()),
        changed_by: Some(reviewer.id.clone()),
    };
    // The piece columns and the current version must agree, or the next
    // edit snapshots the pre-draft text.
    ContentPieceRepo::set_text(
        tx,
        piece.id,
        payload.title.as_deref(),
        payload.description.as_deref(),
        payload.content.as_deref(),
    )
    .await?;
    let version = ContentVersionRepo::create_as_current(tx, piece.id, &payload).await?;

    tracing::info!(
        content_piece_id = piece.id,
        draft_id = draft.id,
        version_number = version.version_number,
        "Selected draft finalized on approval",
    );
    Ok(())
}
