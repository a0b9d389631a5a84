//! Handlers for content piece CRUD.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use contentflow_core::types::DbId;
use contentflow_db::models::content_piece::{CreateContentPiece, UpdateContentPiece};
use contentflow_workflow::ContentService;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /content
// ---------------------------------------------------------------------------

/// Create a content piece in `draft` with its initial version.
pub async fn create_content_piece(
    State(state): State<AppState>,
    Json(input): Json<CreateContentPiece>,
) -> AppResult<impl IntoResponse> {
    let piece = ContentService::create_content_piece(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: piece })))
}

// ---------------------------------------------------------------------------
// GET /content/{id}
// ---------------------------------------------------------------------------

pub async fn get_content_piece(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let piece = ContentService::get_content_piece(&state.pool, id).await?;
    Ok(Json(DataResponse { data: piece }))
}

// ---------------------------------------------------------------------------
// PUT /content/{id}
// ---------------------------------------------------------------------------

/// Edit a piece. Text changes append a version.
pub async fn update_content_piece(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateContentPiece>,
) -> AppResult<impl IntoResponse> {
    let piece = ContentService::update_content_piece(&state.pool, id, &input).await?;
    Ok(Json(DataResponse { data: piece }))
}

// ---------------------------------------------------------------------------
// DELETE /content/{id}
// ---------------------------------------------------------------------------

/// Delete a piece and everything it owns.
pub async fn delete_content_piece(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ContentService::delete_content_piece(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
