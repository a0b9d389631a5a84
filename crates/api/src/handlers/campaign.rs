//! Handler for creating the campaigns that own content pieces.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use contentflow_db::models::campaign::CreateCampaign;
use contentflow_workflow::ContentService;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /campaigns
pub async fn create_campaign(
    State(state): State<AppState>,
    Json(input): Json<CreateCampaign>,
) -> AppResult<impl IntoResponse> {
    let campaign = ContentService::create_campaign(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: campaign })))
}
