//! Transactional orchestration of the content workflow.
//!
//! Each service is a zero-sized struct whose operations take `&PgPool`,
//! open at most one transaction, and return the freshly reloaded entity.
//! A failed operation drops its transaction without committing, so no
//! partial writes survive an error.

pub mod content_service;
pub mod draft_registry;
pub mod review_workflow;
pub mod translation_service;
pub mod version_store;

pub use content_service::ContentService;
pub use draft_registry::DraftRegistry;
pub use review_workflow::ReviewWorkflow;
pub use translation_service::TranslationService;
pub use version_store::VersionStore;

use contentflow_core::error::CoreError;
use contentflow_core::types::DbId;
use validator::Validate;

/// Error returned by every workflow operation.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// A domain-level error from `contentflow_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience alias for workflow return values.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

impl WorkflowError {
    pub(crate) fn not_found(entity: &'static str, id: DbId) -> Self {
        Self::Core(CoreError::NotFound { entity, id })
    }
}

/// Run the derived field checks of a request DTO.
pub(crate) fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))
}
