//! Review audit trail verification.
//!
//! A piece's reviews, ordered by creation time, must replay as a valid
//! walk through the review state machine starting at `draft` and ending at
//! the piece's current state.

use crate::error::CoreError;
use crate::review::{validate_transition, ReviewAction, ReviewState};

/// One recorded transition, as read back from storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewStep {
    pub previous_state: ReviewState,
    pub new_state: ReviewState,
    pub action: ReviewAction,
}

/// Replay `steps` from `draft` and check they end at `current`.
///
/// Fails with [`CoreError::Conflict`] on the first step that does not start
/// where the previous one ended, or that the transition table refuses.
pub fn verify_review_chain(steps: &[ReviewStep], current: ReviewState) -> Result<(), CoreError> {
    let mut state = ReviewState::Draft;

    for (index, step) in steps.iter().enumerate() {
        if step.previous_state != state {
            return Err(CoreError::Conflict(format!(
                "Review {index} starts at '{}' but the piece was '{state}'",
                step.previous_state
            )));
        }
        validate_transition(step.previous_state, step.new_state, step.action).map_err(|e| {
            CoreError::Conflict(format!("Review {index} is not a legal transition: {e}"))
        })?;
        state = step.new_state;
    }

    if state != current {
        return Err(CoreError::Conflict(format!(
            "Review trail ends at '{state}' but the piece is '{current}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ReviewAction::*;
    use ReviewState::*;

    fn step(from: ReviewState, to: ReviewState, action: ReviewAction) -> ReviewStep {
        ReviewStep {
            previous_state: from,
            new_state: to,
            action,
        }
    }

    #[test]
    fn empty_trail_matches_new_piece() {
        assert!(verify_review_chain(&[], Draft).is_ok());
        assert!(verify_review_chain(&[], Approved).is_err());
    }

    #[test]
    fn full_lifecycle_verifies() {
        let steps = [
            step(Draft, PendingReview, Edit),
            step(PendingReview, Rejected, Reject),
            step(Rejected, PendingReview, Edit),
            step(PendingReview, Approved, Approve),
        ];
        assert!(verify_review_chain(&steps, Approved).is_ok());
    }

    #[test]
    fn gap_in_trail_is_reported() {
        let steps = [
            step(Draft, PendingReview, Edit),
            step(Reviewed, Approved, Approve),
        ];
        let err = verify_review_chain(&steps, Approved).unwrap_err();
        assert!(err.to_string().contains("Review 1 starts at 'reviewed'"));
    }

    #[test]
    fn illegal_step_is_reported() {
        let steps = [step(Draft, Approved, Approve)];
        assert!(verify_review_chain(&steps, Approved).is_err());
    }
}
