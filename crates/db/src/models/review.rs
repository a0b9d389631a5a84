//! Review audit record model and review request DTOs.

use contentflow_core::audit::ReviewStep;
use contentflow_core::error::CoreError;
use contentflow_core::review::{ReviewAction, ReviewState, ReviewType, Reviewer};
use contentflow_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `reviews` table. Rows are never updated.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub content_piece_id: DbId,
    pub review_type: String,
    pub action: String,
    pub previous_state: String,
    pub new_state: String,
    pub comments: Option<String>,
    pub suggestions: Option<String>,
    pub edited_content: Option<serde_json::Value>,
    pub reviewer_id: String,
    pub reviewer_name: Option<String>,
    pub reviewer_role: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Review {
    /// Parse the stored transition for audit replay.
    pub fn step(&self) -> Result<ReviewStep, CoreError> {
        Ok(ReviewStep {
            previous_state: ReviewState::from_str_value(&self.previous_state)?,
            new_state: ReviewState::from_str_value(&self.new_state)?,
            action: ReviewAction::from_str_value(&self.action)?,
        })
    }
}

/// A fully resolved review row, ready to insert.
#[derive(Debug, Clone)]
pub struct NewReview<'a> {
    pub content_piece_id: DbId,
    pub review_type: ReviewType,
    pub action: ReviewAction,
    pub previous_state: ReviewState,
    pub new_state: ReviewState,
    pub comments: Option<&'a str>,
    pub suggestions: Option<&'a str>,
    pub edited_content: Option<&'a serde_json::Value>,
    pub reviewer: &'a Reviewer,
}

/// Request body for a generic state transition.
#[derive(Debug, Clone, Deserialize)]
pub struct TransitionRequest {
    pub new_state: ReviewState,
    pub review_type: ReviewType,
    pub action: ReviewAction,
    pub comments: Option<String>,
    pub suggestions: Option<String>,
    pub edited_content: Option<serde_json::Value>,
    pub reviewer: Option<Reviewer>,
}

/// Request body for the approve endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ApproveRequest {
    pub reviewer: Option<Reviewer>,
    pub comments: Option<String>,
    pub publish_immediately: Option<bool>,
}

/// Request body for the reject endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RejectRequest {
    pub reviewer: Option<Reviewer>,
    pub reason: String,
    pub suggestions: Option<String>,
}

/// Request body for the submit-for-review endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitRequest {
    pub comments: Option<String>,
}
