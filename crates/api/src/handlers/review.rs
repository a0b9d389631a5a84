//! Handlers for review transitions and the review audit trail.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use contentflow_core::types::DbId;
use contentflow_db::models::review::{
    ApproveRequest, RejectRequest, SubmitRequest, TransitionRequest,
};
use contentflow_workflow::ReviewWorkflow;
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Result of replaying a piece's review trail.
#[derive(Debug, Serialize)]
pub struct HistoryCheck {
    pub content_piece_id: DbId,
    pub verified: bool,
}

// ---------------------------------------------------------------------------
// POST /content/{id}/transition
// ---------------------------------------------------------------------------

/// Apply an explicit state transition. Unlisted transitions answer 412.
pub async fn transition(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<TransitionRequest>,
) -> AppResult<impl IntoResponse> {
    let piece = ReviewWorkflow::transition(&state.pool, id, &input).await?;
    Ok(Json(DataResponse { data: piece }))
}

// ---------------------------------------------------------------------------
// POST /content/{id}/approve
// ---------------------------------------------------------------------------

pub async fn approve(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ApproveRequest>,
) -> AppResult<impl IntoResponse> {
    let piece = ReviewWorkflow::approve(&state.pool, id, &input).await?;
    Ok(Json(DataResponse { data: piece }))
}

// ---------------------------------------------------------------------------
// POST /content/{id}/reject
// ---------------------------------------------------------------------------

pub async fn reject(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RejectRequest>,
) -> AppResult<impl IntoResponse> {
    let piece = ReviewWorkflow::reject(&state.pool, id, &input).await?;
    Ok(Json(DataResponse { data: piece }))
}

// ---------------------------------------------------------------------------
// POST /content/{id}/submit
// ---------------------------------------------------------------------------

/// Queue a piece for review. The body is optional.
pub async fn submit_for_review(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    input: Option<Json<SubmitRequest>>,
) -> AppResult<impl IntoResponse> {
    let input = input.map(|Json(body)| body).unwrap_or_default();
    let piece = ReviewWorkflow::submit_for_review(&state.pool, id, &input).await?;
    Ok(Json(DataResponse { data: piece }))
}

// ---------------------------------------------------------------------------
// GET /content/{id}/reviews
// ---------------------------------------------------------------------------

pub async fn list_reviews(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let reviews = ReviewWorkflow::list_reviews(&state.pool, id).await?;
    Ok(Json(DataResponse { data: reviews }))
}

// ---------------------------------------------------------------------------
// GET /content/{id}/reviews/verify
// ---------------------------------------------------------------------------

/// Replay the review trail. A broken trail answers 409.
pub async fn verify_history(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ReviewWorkflow::verify_history(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: HistoryCheck {
            content_piece_id: id,
            verified: true,
        },
    }))
}
