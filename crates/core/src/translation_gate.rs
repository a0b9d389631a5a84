//! Translation readiness gate.
//!
//! Translation may only start from approved content. Every translation
//! path calls [`ensure_can_translate`] before handing text to a model.

use crate::error::CoreError;
use crate::review::ReviewState;

/// Message carried by the precondition failure.
pub const NOT_APPROVED_MESSAGE: &str = "content must be approved before translation";

/// Whether a piece in `state` may be translated.
pub fn can_translate(state: ReviewState) -> bool {
    state == ReviewState::Approved
}

/// Fail with [`CoreError::PreconditionFailed`] unless `state` is approved.
pub fn ensure_can_translate(state: ReviewState) -> Result<(), CoreError> {
    if can_translate(state) {
        Ok(())
    } else {
        Err(CoreError::PreconditionFailed(NOT_APPROVED_MESSAGE.to_string()))
    }
}
