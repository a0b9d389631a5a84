//! Content piece entity model and DTOs.

use contentflow_core::content::{ContentType, Priority};
use contentflow_core::error::CoreError;
use contentflow_core::review::ReviewState;
use contentflow_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `content_pieces` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContentPiece {
    pub id: DbId,
    pub campaign_id: DbId,
    pub content_type: String,
    pub source_language: String,
    pub target_language: Option<String>,
    pub review_state: String,
    pub priority: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub original_content: Option<String>,
    pub final_text: Option<String>,
    pub translation_of: Option<DbId>,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ContentPiece {
    /// Parse the stored review state.
    pub fn state(&self) -> Result<ReviewState, CoreError> {
        ReviewState::from_str_value(&self.review_state).map_err(|_| {
            CoreError::Internal(format!(
                "content piece {} has unknown review state '{}'",
                self.id, self.review_state
            ))
        })
    }

    /// Parse the stored content type.
    pub fn kind(&self) -> Result<ContentType, CoreError> {
        ContentType::from_str_value(&self.content_type).map_err(|_| {
            CoreError::Internal(format!(
                "content piece {} has unknown content type '{}'",
                self.id, self.content_type
            ))
        })
    }

    /// Parse the stored priority, falling back to the default.
    pub fn priority_level(&self) -> Priority {
        Priority::from_str_value(&self.priority).unwrap_or_default()
    }

    /// The text a translation or score should be measured against:
    /// the approved final text when present, otherwise the working body.
    pub fn source_text(&self) -> &str {
        self.final_text
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .or(self.original_content.as_deref())
            .unwrap_or_default()
    }
}

/// DTO for creating a new content piece. New pieces always start in `draft`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateContentPiece {
    pub campaign_id: DbId,
    pub content_type: ContentType,
    #[validate(length(min = 2, max = 35))]
    pub source_language: String,
    #[validate(length(min = 2, max = 35))]
    pub target_language: Option<String>,
    pub priority: Option<Priority>,
    #[validate(length(max = 500))]
    pub title: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub original_content: Option<String>,
    /// Who is creating the piece; recorded on the initial version.
    pub created_by: Option<String>,
}

/// DTO for updating a content piece. All fields optional; `None` keeps the
/// stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateContentPiece {
    #[validate(length(max = 500))]
    pub title: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub original_content: Option<String>,
    pub priority: Option<Priority>,
    #[validate(length(min = 2, max = 35))]
    pub target_language: Option<String>,
    /// Recorded on the version snapshot when text changes.
    pub changed_by: Option<String>,
    pub change_reason: Option<String>,
}

impl UpdateContentPiece {
    /// Whether applying this update would change the versioned text of `piece`.
    pub fn changes_text_of(&self, piece: &ContentPiece) -> bool {
        fn differs(new: &Option<String>, old: &Option<String>) -> bool {
            new.as_ref().is_some_and(|n| Some(n) != old.as_ref())
        }
        differs(&self.title, &piece.title)
            || differs(&self.description, &piece.description)
            || differs(&self.original_content, &piece.original_content)
    }
}
