//! Repository for the `reviews` audit table. Insert and read only.

use contentflow_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::review::{NewReview, Review};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, content_piece_id, review_type, action, previous_state, new_state, \
    comments, suggestions, edited_content, reviewer_id, reviewer_name, reviewer_role, \
    created_at, updated_at";

/// Provides append and listing for review records.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Record a review inside the transaction that applies its state change.
    pub async fn create(
        tx: &mut Transaction<'_, Postgres>,
        input: &NewReview<'_>,
    ) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews
                (content_piece_id, review_type, action, previous_state, new_state,
                 comments, suggestions, edited_content, reviewer_id, reviewer_name, reviewer_role)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(input.content_piece_id)
            .bind(input.review_type.as_str())
            .bind(input.action.as_str())
            .bind(input.previous_state.as_str())
            .bind(input.new_state.as_str())
            .bind(input.comments)
            .bind(input.suggestions)
            .bind(input.edited_content)
            .bind(&input.reviewer.id)
            .bind(&input.reviewer.name)
            .bind(&input.reviewer.role)
            .fetch_one(&mut **tx)
            .await
    }

    /// List the review history of a piece in the order it happened.
    ///
    /// Ordered by `id`: rows are inserted while the piece row is locked, so
    /// ids follow the order of transitions. `created_at` is the start time
    /// of the inserting transaction and can run out of order.
    pub async fn list_by_content_piece(
        pool: &PgPool,
        content_piece_id: DbId,
    ) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews
             WHERE content_piece_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(content_piece_id)
            .fetch_all(pool)
            .await
    }
}
