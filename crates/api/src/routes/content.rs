//! Route definitions for content pieces and their sub-resources.
//!
//! Mounted at `/content`. Everything below `/{id}` is scoped to one piece.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{content, draft, review, translation, version};
use crate::state::AppState;

/// Routes mounted at `/content`.
///
/// ```text
/// POST   /                                    create_content_piece
/// GET    /{id}                                get_content_piece
/// PUT    /{id}                                update_content_piece
/// DELETE /{id}                                delete_content_piece
///
/// POST   /{id}/transition                     transition
/// POST   /{id}/submit                         submit_for_review
/// POST   /{id}/approve                        approve
/// POST   /{id}/reject                         reject
/// GET    /{id}/reviews                        list_reviews
/// GET    /{id}/reviews/verify                 verify_history
///
/// GET    /{id}/drafts                         list_drafts
/// GET    /{id}/drafts/selected                get_selected_draft
/// GET    /{id}/drafts/metrics                 draft_metrics
///
/// GET    /{id}/versions                       list_versions
/// POST   /{id}/versions                       create_version
/// GET    /{id}/versions/current               get_current_version
/// GET    /{id}/versions/{n}                   get_version
/// POST   /{id}/versions/{n}/restore           restore_version
///
/// GET    /{id}/can-translate                  can_translate
/// GET    /{id}/translations                   list_translations
/// POST   /{id}/translations                   create_translation
/// GET    /{id}/translated-pieces              list_translated_pieces
/// ```
pub fn router() -> Router<AppState> {
    let review_routes = Router::new()
        .route("/transition", post(review::transition))
        .route("/submit", post(review::submit_for_review))
        .route("/approve", post(review::approve))
        .route("/reject", post(review::reject))
        .route("/reviews", get(review::list_reviews))
        .route("/reviews/verify", get(review::verify_history));

    let draft_routes = Router::new()
        .route("/", get(draft::list_drafts))
        .route("/selected", get(draft::get_selected_draft))
        .route("/metrics", get(draft::draft_metrics));

    let version_routes = Router::new()
        .route("/", get(version::list_versions).post(version::create_version))
        .route("/current", get(version::get_current_version))
        .route("/{n}", get(version::get_version))
        .route("/{n}/restore", post(version::restore_version));

    Router::new()
        .route("/", post(content::create_content_piece))
        .route(
            "/{id}",
            get(content::get_content_piece)
                .put(content::update_content_piece)
                .delete(content::delete_content_piece),
        )
        .route("/{id}/can-translate", get(translation::can_translate))
        .route(
            "/{id}/translations",
            get(translation::list_translations).post(translation::create_translation),
        )
        .route(
            "/{id}/translated-pieces",
            get(translation::list_translated_pieces),
        )
        .nest("/{id}", review_routes)
        .nest("/{id}/drafts", draft_routes)
        .nest("/{id}/versions", version_routes)
}
