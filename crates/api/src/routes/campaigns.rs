use axum::routing::post;
use axum::Router;

use crate::handlers::campaign;
use crate::state::AppState;

/// Routes mounted at `/campaigns`.
///
/// ```text
/// POST   /                                    create_campaign
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(campaign::create_campaign))
}
