//! Integration tests for draft creation, selection and metrics.

mod common;

use assert_matches::assert_matches;
use contentflow_core::error::CoreError;
use contentflow_db::repositories::AiDraftRepo;
use contentflow_workflow::{DraftRegistry, WorkflowError};
use sqlx::PgPool;

use common::*;

async fn selected_ids(pool: &PgPool, content_piece_id: i64) -> Vec<i64> {
    DraftRegistry::list_drafts(pool, content_piece_id)
        .await
        .unwrap()
        .into_iter()
        .filter(|d| d.status == "selected")
        .map(|d| d.id)
        .collect()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reselecting_moves_the_selection(pool: PgPool) {
    let piece = create_piece(&pool).await;
    let a = DraftRegistry::create_draft(&pool, &new_draft(piece.id, "A", "First take."))
        .await
        .unwrap();
    let b = DraftRegistry::create_draft(&pool, &new_draft(piece.id, "B", "Second take."))
        .await
        .unwrap();

    DraftRegistry::select_draft(&pool, a.id).await.unwrap();
    DraftRegistry::select_draft(&pool, b.id).await.unwrap();

    let a = AiDraftRepo::find_by_id(&pool, a.id).await.unwrap().unwrap();
    assert_eq!(a.status, "candidate");
    assert_eq!(selected_ids(&pool, piece.id).await, vec![b.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_selects_resolve_to_one(pool: PgPool) {
    let piece = create_piece(&pool).await;
    let a = DraftRegistry::create_draft(&pool, &new_draft(piece.id, "A", "First take."))
        .await
        .unwrap();
    let b = DraftRegistry::create_draft(&pool, &new_draft(piece.id, "B", "Second take."))
        .await
        .unwrap();

    let (ra, rb) = tokio::join!(
        DraftRegistry::select_draft(&pool, a.id),
        DraftRegistry::select_draft(&pool, b.id),
    );
    ra.unwrap();
    rb.unwrap();

    let selected = selected_ids(&pool, piece.id).await;
    assert_eq!(selected.len(), 1);
    assert!(selected[0] == a.id || selected[0] == b.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_selected_demotes_previous(pool: PgPool) {
    let piece = create_piece(&pool).await;
    let mut first = new_draft(piece.id, "A", "First take.");
    first.select = true;
    let first = DraftRegistry::create_draft(&pool, &first).await.unwrap();

    let mut second = new_draft(piece.id, "B", "Second take.");
    second.select = true;
    let second = DraftRegistry::create_draft(&pool, &second).await.unwrap();

    assert_eq!(second.status, "selected");
    assert_eq!(selected_ids(&pool, piece.id).await, vec![second.id]);
    let first = AiDraftRepo::find_by_id(&pool, first.id).await.unwrap().unwrap();
    assert_eq!(first.status, "candidate");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn discarded_draft_can_be_selected_again(pool: PgPool) {
    let piece = create_piece(&pool).await;
    let draft = DraftRegistry::create_draft(&pool, &new_draft(piece.id, "A", "Take."))
        .await
        .unwrap();

    let discarded = DraftRegistry::discard_draft(&pool, draft.id).await.unwrap();
    assert_eq!(discarded.status, "discarded");

    let selected = DraftRegistry::select_draft(&pool, draft.id).await.unwrap();
    assert_eq!(selected.status, "selected");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_draft_is_not_found(pool: PgPool) {
    for result in [
        DraftRegistry::select_draft(&pool, 77).await,
        DraftRegistry::discard_draft(&pool, 77).await,
        DraftRegistry::rate_draft(&pool, 77, 3).await,
    ] {
        assert_matches!(
            result,
            Err(WorkflowError::Core(CoreError::NotFound { entity: "AiDraft", id: 77 }))
        );
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn draft_for_missing_piece_is_not_found(pool: PgPool) {
    let err = DraftRegistry::create_draft(&pool, &new_draft(9_999, "A", "Take."))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        WorkflowError::Core(CoreError::NotFound { entity: "ContentPiece", .. })
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn score_is_derived_when_absent(pool: PgPool) {
    let piece = create_piece(&pool).await;

    let derived = DraftRegistry::create_draft(&pool, &new_draft(piece.id, "A", BODY))
        .await
        .unwrap();
    let score = derived.quality_score.unwrap();
    assert!((0.0..=1.0).contains(&score));
    assert!((score - contentflow_core::quality::score(BODY, BODY, None)).abs() < 1e-9);

    let mut supplied = new_draft(piece.id, "B", BODY);
    supplied.quality_score = Some(0.42);
    let supplied = DraftRegistry::create_draft(&pool, &supplied).await.unwrap();
    assert_eq!(supplied.quality_score, Some(0.42));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_generation_params_rejected(pool: PgPool) {
    let piece = create_piece(&pool).await;
    let mut input = new_draft(piece.id, "A", "Take.");
    input.temperature = Some(3.5);

    let err = DraftRegistry::create_draft(&pool, &input).await.unwrap_err();
    assert_matches!(err, WorkflowError::Core(CoreError::Validation(_)));

    input.temperature = Some(0.5);
    input.model_used = String::new();
    let err = DraftRegistry::create_draft(&pool, &input).await.unwrap_err();
    assert_matches!(err, WorkflowError::Core(CoreError::Validation(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rating_outside_range_rejected(pool: PgPool) {
    let piece = create_piece(&pool).await;
    let draft = DraftRegistry::create_draft(&pool, &new_draft(piece.id, "A", "Take."))
        .await
        .unwrap();

    let err = DraftRegistry::rate_draft(&pool, draft.id, 6).await.unwrap_err();
    assert_matches!(err, WorkflowError::Core(CoreError::Validation(_)));

    let rated = DraftRegistry::rate_draft(&pool, draft.id, 5).await.unwrap();
    assert_eq!(rated.rating, Some(5));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn metrics_count_by_status(pool: PgPool) {
    let piece = create_piece(&pool).await;
    let empty = DraftRegistry::metrics(&pool, piece.id).await.unwrap();
    assert_eq!(empty.total, 0);
    assert_eq!(empty.avg_cost, 0.0);

    let a = DraftRegistry::create_draft(&pool, &new_draft(piece.id, "A", "One."))
        .await
        .unwrap();
    let b = DraftRegistry::create_draft(&pool, &new_draft(piece.id, "B", "Two."))
        .await
        .unwrap();
    DraftRegistry::create_draft(&pool, &new_draft(piece.id, "C", "Three."))
        .await
        .unwrap();
    DraftRegistry::select_draft(&pool, a.id).await.unwrap();
    DraftRegistry::discard_draft(&pool, b.id).await.unwrap();

    let metrics = DraftRegistry::metrics(&pool, piece.id).await.unwrap();
    assert_eq!(metrics.total, 3);
    assert_eq!(metrics.selected_count, 1);
    assert_eq!(metrics.discarded_count, 1);
    assert_eq!(metrics.candidate_count, 1);
    assert_eq!(metrics.avg_response_time_ms, 900.0);
    assert!((metrics.avg_cost - 0.01).abs() < 1e-9);
}
