//! Repository for the `ai_drafts` table.

use contentflow_core::draft::DraftStatus;
use contentflow_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::ai_draft::{AiDraft, CreateDraft, DraftMetrics};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, content_piece_id, model_used, generation_type, title, description, \
    body, extra, status, prompt, temperature, max_tokens, cost, response_time_ms, \
    token_count, quality_score, rating, created_at, updated_at";

/// Provides CRUD and selection for AI drafts.
pub struct AiDraftRepo;

impl AiDraftRepo {
    /// Insert a new `candidate` draft.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDraft,
        quality_score: Option<f64>,
    ) -> Result<AiDraft, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let draft = Self::insert(&mut tx, input, quality_score, DraftStatus::Candidate).await?;
        tx.commit().await?;
        Ok(draft)
    }

    /// Insert a new draft as the piece's selected draft, demoting any
    /// previously selected draft in the same transaction.
    ///
    /// The content piece row is locked first so concurrent selections for
    /// the same piece queue behind each other.
    pub async fn create_as_selected(
        pool: &PgPool,
        input: &CreateDraft,
        quality_score: Option<f64>,
    ) -> Result<AiDraft, sqlx::Error> {
        let mut tx = pool.begin().await?;

        lock_piece(&mut tx, input.content_piece_id).await?;
        demote_selected(&mut tx, input.content_piece_id, None).await?;
        let draft = Self::insert(&mut tx, input, quality_score, DraftStatus::Selected).await?;

        tx.commit().await?;
        Ok(draft)
    }

    async fn insert(
        tx: &mut Transaction<'_, Postgres>,
        input: &CreateDraft,
        quality_score: Option<f64>,
        status: DraftStatus,
    ) -> Result<AiDraft, sqlx::Error> {
        let extra = input
            .content
            .extra
            .clone()
            .unwrap_or_else(|| serde_json::json!({}));
        let query = format!(
            "INSERT INTO ai_drafts
                (content_piece_id, model_used, generation_type, title, description, body,
                 extra, status, prompt, temperature, max_tokens, cost, response_time_ms,
                 token_count, quality_score)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AiDraft>(&query)
            .bind(input.content_piece_id)
            .bind(&input.model_used)
            .bind(input.generation_type.as_str())
            .bind(&input.content.title)
            .bind(&input.content.description)
            .bind(&input.content.body)
            .bind(extra)
            .bind(status.as_str())
            .bind(&input.prompt)
            .bind(input.temperature)
            .bind(input.max_tokens)
            .bind(input.cost)
            .bind(input.response_time_ms)
            .bind(input.token_count)
            .bind(quality_score)
            .fetch_one(&mut **tx)
            .await
    }

    /// Find a draft by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AiDraft>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ai_drafts WHERE id = $1");
        sqlx::query_as::<_, AiDraft>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all drafts for a content piece, newest first.
    pub async fn list_by_content_piece(
        pool: &PgPool,
        content_piece_id: DbId,
    ) -> Result<Vec<AiDraft>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ai_drafts
             WHERE content_piece_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, AiDraft>(&query)
            .bind(content_piece_id)
            .fetch_all(pool)
            .await
    }

    /// Mark `draft_id` as the selected draft of `content_piece_id`, demoting
    /// whichever draft was selected before.
    ///
    /// Returns `None` if the draft does not belong to the piece. In that case
    /// nothing is changed.
    pub async fn select(
        pool: &PgPool,
        content_piece_id: DbId,
        draft_id: DbId,
    ) -> Result<Option<AiDraft>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        lock_piece(&mut tx, content_piece_id).await?;
        demote_selected(&mut tx, content_piece_id, Some(draft_id)).await?;

        let query = format!(
            "UPDATE ai_drafts SET status = $3 \
             WHERE id = $1 AND content_piece_id = $2 \
             RETURNING {COLUMNS}"
        );
        let result = sqlx::query_as::<_, AiDraft>(&query)
            .bind(draft_id)
            .bind(content_piece_id)
            .bind(DraftStatus::Selected.as_str())
            .fetch_optional(&mut *tx)
            .await?;

        if result.is_some() {
            tx.commit().await?;
        } else {
            tx.rollback().await?;
        }
        Ok(result)
    }

    /// Mark a draft as discarded. A selected draft loses its selection.
    pub async fn discard(pool: &PgPool, id: DbId) -> Result<Option<AiDraft>, sqlx::Error> {
        let query = format!("UPDATE ai_drafts SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, AiDraft>(&query)
            .bind(id)
            .bind(DraftStatus::Discarded.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Record a human rating on a draft.
    pub async fn set_rating(
        pool: &PgPool,
        id: DbId,
        rating: i16,
    ) -> Result<Option<AiDraft>, sqlx::Error> {
        let query = format!("UPDATE ai_drafts SET rating = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, AiDraft>(&query)
            .bind(id)
            .bind(rating)
            .fetch_optional(pool)
            .await
    }

    /// Find the selected draft for a piece (if any).
    pub async fn find_selected(
        pool: &PgPool,
        content_piece_id: DbId,
    ) -> Result<Option<AiDraft>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ai_drafts WHERE content_piece_id = $1 AND status = $2"
        );
        sqlx::query_as::<_, AiDraft>(&query)
            .bind(content_piece_id)
            .bind(DraftStatus::Selected.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Same as [`Self::find_selected`] but reads inside a running transaction.
    pub async fn find_selected_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        content_piece_id: DbId,
    ) -> Result<Option<AiDraft>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ai_drafts WHERE content_piece_id = $1 AND status = $2"
        );
        sqlx::query_as::<_, AiDraft>(&query)
            .bind(content_piece_id)
            .bind(DraftStatus::Selected.as_str())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Count and average the drafts of a piece.
    pub async fn metrics(
        pool: &PgPool,
        content_piece_id: DbId,
    ) -> Result<DraftMetrics, sqlx::Error> {
        sqlx::query_as::<_, DraftMetrics>(
            "SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'candidate') AS candidate_count,
                COUNT(*) FILTER (WHERE status = 'selected') AS selected_count,
                COUNT(*) FILTER (WHERE status = 'discarded') AS discarded_count,
                COALESCE(AVG(response_time_ms)::float8, 0) AS avg_response_time_ms,
                COALESCE(AVG(cost), 0) AS avg_cost,
                COALESCE(AVG(quality_score), 0) AS avg_quality_score
             FROM ai_drafts
             WHERE content_piece_id = $1",
        )
        .bind(content_piece_id)
        .fetch_one(pool)
        .await
    }
}

/// Take the row lock on the owning content piece.
async fn lock_piece(
    tx: &mut Transaction<'_, Postgres>,
    content_piece_id: DbId,
) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT id FROM content_pieces WHERE id = $1 FOR UPDATE")
        .bind(content_piece_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Move the currently selected draft (other than `except`) back to `candidate`.
async fn demote_selected(
    tx: &mut Transaction<'_, Postgres>,
    content_piece_id: DbId,
    except: Option<DbId>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE ai_drafts SET status = 'candidate' \
         WHERE content_piece_id = $1 AND status = 'selected' \
         AND ($2::BIGINT IS NULL OR id <> $2)",
    )
    .bind(content_piece_id)
    .bind(except)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
