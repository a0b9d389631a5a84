//! Review state machine, review tags, and reviewer identity validation.
//!
//! Every change to a content piece's `review_state` is checked against the
//! transition table in [`allowed_actions`]. Unlisted `(from, to, action)`
//! combinations are refused with [`CoreError::PreconditionFailed`].

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::macros::define_str_enum;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Maximum length for review comments and suggestions.
pub const MAX_COMMENT_LENGTH: usize = 10_000;

/// Maximum length for a reviewer id, name, or role.
pub const MAX_REVIEWER_FIELD_LENGTH: usize = 255;

/// Reviewer id recorded for transitions the system performs on a caller's behalf.
pub const SYSTEM_REVIEWER_ID: &str = "system";

/* --------------------------------------------------------------------------
Enums
-------------------------------------------------------------------------- */

define_str_enum! {
    /// Editorial status of a content piece.
    ReviewState ("review state", VALID_REVIEW_STATES) {
        /// Initial state of every new piece.
        Draft = "draft",
        /// An AI draft has been generated for the piece.
        AiSuggested = "ai_suggested",
        /// Waiting for a human reviewer.
        PendingReview = "pending_review",
        /// A reviewer has gone over the piece but not signed it off.
        Reviewed = "reviewed",
        /// Signed off. Unlocks translation.
        Approved = "approved",
        /// Sent back. Must be resubmitted explicitly.
        Rejected = "rejected",
    }
}

define_str_enum! {
    /// What the reviewer did.
    ReviewAction ("review action", VALID_REVIEW_ACTIONS) {
        Approve = "approve",
        Reject = "reject",
        Edit = "edit",
    }
}

define_str_enum! {
    /// Which kind of review produced a transition.
    ReviewType ("review type", VALID_REVIEW_TYPES) {
        Content = "content",
        Translation = "translation",
        Quality = "quality",
        FinalApproval = "final_approval",
    }
}

impl ReviewState {
    /// `approved` and `rejected` only move on through an explicit resubmission.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// States a reviewer may reject from.
    pub fn is_reviewable(self) -> bool {
        matches!(self, Self::AiSuggested | Self::PendingReview | Self::Reviewed)
    }
}

/* --------------------------------------------------------------------------
Transition table
-------------------------------------------------------------------------- */

/// Actions that may move a piece from `from` to `to`.
///
/// An empty slice means the transition is not allowed at all.
///
/// - `draft`          -> `ai_suggested`, `pending_review` (edit)
/// - `ai_suggested`   -> `draft`, `pending_review` (edit), `rejected` (reject)
/// - `pending_review` -> `reviewed` (approve, edit), `approved` (approve), `rejected` (reject)
/// - `reviewed`       -> `approved` (approve), `pending_review` (edit), `rejected` (reject)
/// - `rejected`       -> `draft`, `pending_review` (edit)
/// - non-terminal states may record an edit without changing state
pub fn allowed_actions(from: ReviewState, to: ReviewState) -> &'static [ReviewAction] {
    use ReviewAction::{Approve, Edit, Reject};
    use ReviewState::*;

    match (from, to) {
        (Draft, AiSuggested) | (Draft, PendingReview) => &[Edit],
        (AiSuggested, Draft) | (AiSuggested, PendingReview) => &[Edit],
        (PendingReview, Reviewed) => &[Approve, Edit],
        (PendingReview, Approved) | (Reviewed, Approved) => &[Approve],
        (Reviewed, PendingReview) => &[Edit],
        (s, Rejected) if s.is_reviewable() => &[Reject],
        (Rejected, Draft) | (Rejected, PendingReview) => &[Edit],
        (s, t) if s == t && !s.is_terminal() => &[Edit],
        _ => &[],
    }
}

/// States reachable from `from` with any action.
pub fn valid_targets(from: ReviewState) -> Vec<ReviewState> {
    ReviewState::ALL
        .iter()
        .copied()
        .filter(|to| !allowed_actions(from, *to).is_empty())
        .collect()
}

/// Validate that `action` may move a piece from `from` to `to`.
pub fn validate_transition(
    from: ReviewState,
    to: ReviewState,
    action: ReviewAction,
) -> Result<(), CoreError> {
    let actions = allowed_actions(from, to);
    if actions.is_empty() {
        let targets: Vec<&str> = valid_targets(from).iter().map(|s| s.as_str()).collect();
        return Err(CoreError::PreconditionFailed(format!(
            "Cannot transition content from '{from}' to '{to}'. Allowed targets: [{}]",
            targets.join(", ")
        )));
    }
    if !actions.contains(&action) {
        let names: Vec<&str> = actions.iter().map(|a| a.as_str()).collect();
        return Err(CoreError::PreconditionFailed(format!(
            "Action '{action}' cannot move content from '{from}' to '{to}'. Expected one of: [{}]",
            names.join(", ")
        )));
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Reviewer identity
-------------------------------------------------------------------------- */

/// Who performed a review. Identity is opaque; no authentication happens here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reviewer {
    pub id: String,
    pub name: Option<String>,
    pub role: Option<String>,
}

impl Reviewer {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            role: None,
        }
    }

    /// The reviewer recorded for submissions that carry no identity.
    pub fn system() -> Self {
        Self {
            id: SYSTEM_REVIEWER_ID.to_string(),
            name: Some("System".to_string()),
            role: Some("system".to_string()),
        }
    }

    /// Validate the identity fields.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.id.trim().is_empty() {
            return Err(CoreError::Validation(
                "Reviewer id must not be empty".to_string(),
            ));
        }
        let fields = [
            ("id", Some(self.id.as_str())),
            ("name", self.name.as_deref()),
            ("role", self.role.as_deref()),
        ];
        for (field, value) in fields {
            if value.is_some_and(|v| v.len() > MAX_REVIEWER_FIELD_LENGTH) {
                return Err(CoreError::Validation(format!(
                    "Reviewer {field} exceeds maximum length of {MAX_REVIEWER_FIELD_LENGTH} characters"
                )));
            }
        }
        Ok(())
    }
}

/// Require a reviewer identity to be present and well-formed.
pub fn require_reviewer(reviewer: Option<&Reviewer>) -> Result<&Reviewer, CoreError> {
    let reviewer = reviewer.ok_or_else(|| {
        CoreError::Validation("A reviewer identity is required".to_string())
    })?;
    reviewer.validate()?;
    Ok(reviewer)
}

/// Validate optional free-text comments or suggestions.
pub fn validate_comment(field: &str, text: Option<&str>) -> Result<(), CoreError> {
    if let Some(t) = text {
        if t.len() > MAX_COMMENT_LENGTH {
            return Err(CoreError::Validation(format!(
                "{field} exceeds maximum length of {MAX_COMMENT_LENGTH} characters"
            )));
        }
    }
    Ok(())
}

/// A rejection must say why.
pub fn validate_rejection_reason(reason: &str) -> Result<(), CoreError> {
    if reason.trim().is_empty() {
        return Err(CoreError::Validation(
            "A rejection must include a reason".to_string(),
        ));
    }
    validate_comment("Rejection reason", Some(reason))
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
