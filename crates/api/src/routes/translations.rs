use axum::routing::post;
use axum::Router;

use crate::handlers::translation;
use crate::state::AppState;

/// Routes mounted at `/translations`.
///
/// ```text
/// POST   /{id}/human-reviewed                 mark_human_reviewed
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/human-reviewed", post(translation::mark_human_reviewed))
}
