//! AI draft entity model, DTOs, and aggregate metrics.

use contentflow_core::draft::{DraftStatus, GenerationType};
use contentflow_core::error::CoreError;
use contentflow_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `ai_drafts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AiDraft {
    pub id: DbId,
    pub content_piece_id: DbId,
    pub model_used: String,
    pub generation_type: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
    pub extra: serde_json::Value,
    pub status: String,
    pub prompt: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<i32>,
    pub cost: Option<f64>,
    pub response_time_ms: Option<i64>,
    pub token_count: Option<i32>,
    pub quality_score: Option<f64>,
    pub rating: Option<i16>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AiDraft {
    /// Parse the stored status.
    pub fn draft_status(&self) -> Result<DraftStatus, CoreError> {
        DraftStatus::from_str_value(&self.status).map_err(|_| {
            CoreError::Internal(format!(
                "draft {} has unknown status '{}'",
                self.id, self.status
            ))
        })
    }
}

/// The generated content bundle of a draft.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct GeneratedContent {
    #[validate(length(max = 500))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
    /// Free-form fields the model returned beyond title/description/body.
    #[serde(default)]
    pub extra: Option<serde_json::Value>,
}

/// DTO for recording a generation attempt.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDraft {
    pub content_piece_id: DbId,
    #[validate(length(min = 1, max = 200))]
    pub model_used: String,
    pub generation_type: GenerationType,
    #[validate(nested)]
    pub content: GeneratedContent,
    pub prompt: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<i32>,
    pub cost: Option<f64>,
    pub response_time_ms: Option<i64>,
    pub token_count: Option<i32>,
    /// Caller-computed score. When absent one is derived from the piece body.
    pub quality_score: Option<f64>,
    /// Model-reported confidence, used when deriving a quality score.
    pub confidence_score: Option<f64>,
    /// Create the draft already selected.
    #[serde(default)]
    pub select: bool,
}

/// Request body for rating a draft.
#[derive(Debug, Clone, Deserialize)]
pub struct RateDraft {
    pub rating: i16,
}

/// Aggregates over the drafts of one content piece.
///
/// Averages only include drafts that have a value for that field and are
/// `0.0` when no draft does.
#[derive(Debug, Clone, FromRow, Serialize, PartialEq)]
pub struct DraftMetrics {
    pub total: i64,
    pub candidate_count: i64,
    pub selected_count: i64,
    pub discarded_count: i64,
    pub avg_response_time_ms: f64,
    pub avg_cost: f64,
    pub avg_quality_score: f64,
}
