//! Handlers for AI drafts.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use contentflow_core::types::DbId;
use contentflow_db::models::ai_draft::{CreateDraft, RateDraft};
use contentflow_workflow::DraftRegistry;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /drafts
pub async fn create_draft(
    State(state): State<AppState>,
    Json(input): Json<CreateDraft>,
) -> AppResult<impl IntoResponse> {
    let draft = DraftRegistry::create_draft(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: draft })))
}

/// POST /drafts/{id}/select
pub async fn select_draft(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let draft = DraftRegistry::select_draft(&state.pool, id).await?;
    Ok(Json(DataResponse { data: draft }))
}

/// POST /drafts/{id}/discard
pub async fn discard_draft(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let draft = DraftRegistry::discard_draft(&state.pool, id).await?;
    Ok(Json(DataResponse { data: draft }))
}

/// PUT /drafts/{id}/rating
pub async fn rate_draft(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RateDraft>,
) -> AppResult<impl IntoResponse> {
    let draft = DraftRegistry::rate_draft(&state.pool, id, input.rating).await?;
    Ok(Json(DataResponse { data: draft }))
}

/// GET /content/{id}/drafts
pub async fn list_drafts(
    State(state): State<AppState>,
    Path(content_piece_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let drafts = DraftRegistry::list_drafts(&state.pool, content_piece_id).await?;
    Ok(Json(DataResponse { data: drafts }))
}

/// GET /content/{id}/drafts/selected
///
/// `data` is `null` when no draft is selected.
pub async fn get_selected_draft(
    State(state): State<AppState>,
    Path(content_piece_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let draft = DraftRegistry::find_selected(&state.pool, content_piece_id).await?;
    Ok(Json(DataResponse { data: draft }))
}

/// GET /content/{id}/drafts/metrics
pub async fn draft_metrics(
    State(state): State<AppState>,
    Path(content_piece_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let metrics = DraftRegistry::metrics(&state.pool, content_piece_id).await?;
    Ok(Json(DataResponse { data: metrics }))
}
