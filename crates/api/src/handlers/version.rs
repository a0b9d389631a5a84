//! Handlers for content version history.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use contentflow_core::types::DbId;
use contentflow_db::models::content_version::{CreateVersion, RestoreVersion};
use contentflow_workflow::VersionStore;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /content/{id}/versions
pub async fn list_versions(
    State(state): State<AppState>,
    Path(content_piece_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let versions = VersionStore::list_versions(&state.pool, content_piece_id).await?;
    Ok(Json(DataResponse { data: versions }))
}

/// POST /content/{id}/versions
pub async fn create_version(
    State(state): State<AppState>,
    Path(content_piece_id): Path<DbId>,
    Json(input): Json<CreateVersion>,
) -> AppResult<impl IntoResponse> {
    let version = VersionStore::create_version(&state.pool, content_piece_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: version })))
}

/// GET /content/{id}/versions/current
pub async fn get_current_version(
    State(state): State<AppState>,
    Path(content_piece_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let version = VersionStore::find_current(&state.pool, content_piece_id).await?;
    Ok(Json(DataResponse { data: version }))
}

/// GET /content/{id}/versions/{n}
pub async fn get_version(
    State(state): State<AppState>,
    Path((content_piece_id, version_number)): Path<(DbId, i32)>,
) -> AppResult<impl IntoResponse> {
    let version = VersionStore::find_version(&state.pool, content_piece_id, version_number).await?;
    Ok(Json(DataResponse { data: version }))
}

/// POST /content/{id}/versions/{n}/restore
///
/// Appends a copy of version `n`; the body is optional.
pub async fn restore_version(
    State(state): State<AppState>,
    Path((content_piece_id, version_number)): Path<(DbId, i32)>,
    input: Option<Json<RestoreVersion>>,
) -> AppResult<impl IntoResponse> {
    let input = input.map(|Json(body)| body).unwrap_or_default();
    let version =
        VersionStore::restore_version(&state.pool, content_piece_id, version_number, &input)
            .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: version })))
}
