//! Handlers for the translation gate and translation records.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use contentflow_core::types::DbId;
use contentflow_db::models::translation::CreateTranslation;
use contentflow_workflow::TranslationService;
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Payload of the gate check.
#[derive(Debug, Serialize)]
pub struct TranslationReadiness {
    pub content_piece_id: DbId,
    pub can_translate: bool,
}

/// GET /content/{id}/can-translate
pub async fn can_translate(
    State(state): State<AppState>,
    Path(content_piece_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let can_translate = TranslationService::can_translate(&state.pool, content_piece_id).await?;
    Ok(Json(DataResponse {
        data: TranslationReadiness {
            content_piece_id,
            can_translate,
        },
    }))
}

/// POST /content/{id}/translations
///
/// Answers 412 unless the piece is approved.
pub async fn create_translation(
    State(state): State<AppState>,
    Path(content_piece_id): Path<DbId>,
    Json(input): Json<CreateTranslation>,
) -> AppResult<impl IntoResponse> {
    let translation =
        TranslationService::create_translation(&state.pool, content_piece_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: translation })))
}

/// GET /content/{id}/translations
pub async fn list_translations(
    State(state): State<AppState>,
    Path(content_piece_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let translations = TranslationService::list_translations(&state.pool, content_piece_id).await?;
    Ok(Json(DataResponse { data: translations }))
}

/// GET /content/{id}/translated-pieces
pub async fn list_translated_pieces(
    State(state): State<AppState>,
    Path(content_piece_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let pieces =
        TranslationService::list_translated_pieces(&state.pool, content_piece_id).await?;
    Ok(Json(DataResponse { data: pieces }))
}

/// POST /translations/{id}/human-reviewed
pub async fn mark_human_reviewed(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let translation = TranslationService::mark_human_reviewed(&state.pool, id).await?;
    Ok(Json(DataResponse { data: translation }))
}
