pub mod campaigns;
pub mod content;
pub mod drafts;
pub mod health;
pub mod translations;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /campaigns                                  create
///
/// /content                                    create
/// /content/{id}                               get, update, delete
/// /content/{id}/transition                    explicit state change (POST)
/// /content/{id}/submit                        submit for review (POST)
/// /content/{id}/approve                       approve (POST)
/// /content/{id}/reject                        reject (POST)
/// /content/{id}/reviews                       review audit trail (GET)
/// /content/{id}/reviews/verify                replay audit trail (GET)
/// /content/{id}/drafts                        list drafts (GET)
/// /content/{id}/drafts/selected               selected draft (GET)
/// /content/{id}/drafts/metrics                generation metrics (GET)
/// /content/{id}/versions                      list, create
/// /content/{id}/versions/current              current version (GET)
/// /content/{id}/versions/{n}                  version by number (GET)
/// /content/{id}/versions/{n}/restore          restore as new version (POST)
/// /content/{id}/can-translate                 translation gate (GET)
/// /content/{id}/translations                  list, create
/// /content/{id}/translated-pieces             materialized translations (GET)
///
/// /drafts                                     create
/// /drafts/{id}/select                         select (POST)
/// /drafts/{id}/discard                        discard (POST)
/// /drafts/{id}/rating                         rate (PUT)
///
/// /translations/{id}/human-reviewed           mark human reviewed (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/campaigns", campaigns::router())
        // Content pieces with their reviews, drafts, versions and translations.
        .nest("/content", content::router())
        .nest("/drafts", drafts::router())
        .nest("/translations", translations::router())
}
