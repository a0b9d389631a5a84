use axum::routing::{post, put};
use axum::Router;

use crate::handlers::draft;
use crate::state::AppState;

/// Routes mounted at `/drafts`.
///
/// ```text
/// POST   /                                    create_draft
/// POST   /{id}/select                         select_draft
/// POST   /{id}/discard                        discard_draft
/// PUT    /{id}/rating                         rate_draft
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(draft::create_draft))
        .route("/{id}/select", post(draft::select_draft))
        .route("/{id}/discard", post(draft::discard_draft))
        .route("/{id}/rating", put(draft::rate_draft))
}
