//! Translation entity model and DTOs.

use contentflow_core::quality::AiMetadata;
use contentflow_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `translations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Translation {
    pub id: DbId,
    pub content_piece_id: DbId,
    pub translated_content_piece_id: Option<DbId>,
    pub source_language: String,
    pub target_language: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: String,
    pub model_used: String,
    pub quality_score: Option<f64>,
    pub human_reviewed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a translation of an approved piece.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTranslation {
    #[validate(length(min = 2, max = 35))]
    pub target_language: String,
    #[validate(length(max = 500))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub content: String,
    #[validate(length(min = 1, max = 200))]
    pub model_used: String,
    pub ai_metadata: Option<AiMetadata>,
    /// Also create a sibling content piece holding the translated text.
    #[serde(default)]
    pub materialize: bool,
}

/// A fully resolved translation row, ready to insert.
#[derive(Debug, Clone)]
pub struct NewTranslation<'a> {
    pub content_piece_id: DbId,
    pub translated_content_piece_id: Option<DbId>,
    pub source_language: &'a str,
    pub input: &'a CreateTranslation,
    pub quality_score: f64,
}
