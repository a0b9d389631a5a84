//! Shared fixtures for workflow integration tests.

#![allow(dead_code)]

use contentflow_core::content::ContentType;
use contentflow_core::draft::GenerationType;
use contentflow_core::review::Reviewer;
use contentflow_db::models::ai_draft::{CreateDraft, GeneratedContent};
use contentflow_db::models::campaign::CreateCampaign;
use contentflow_db::models::content_piece::{ContentPiece, CreateContentPiece};
use contentflow_db::models::review::{ApproveRequest, SubmitRequest};
use contentflow_db::models::translation::CreateTranslation;
use contentflow_workflow::{ContentService, ReviewWorkflow};
use sqlx::PgPool;

pub const BODY: &str = "Spring is here. Our new collection is built for longer days.";

pub fn editor() -> Reviewer {
    Reviewer {
        id: "editor-42".to_string(),
        name: Some("Robin Editor".to_string()),
        role: Some("editor".to_string()),
    }
}

pub fn new_piece(campaign_id: i64) -> CreateContentPiece {
    CreateContentPiece {
        campaign_id,
        content_type: ContentType::BlogPost,
        source_language: "en".to_string(),
        target_language: Some("de".to_string()),
        priority: None,
        title: Some("Spring launch".to_string()),
        description: Some("Seasonal teaser".to_string()),
        original_content: Some(BODY.to_string()),
        created_by: Some("author-1".to_string()),
    }
}

pub async fn create_piece(pool: &PgPool) -> ContentPiece {
    let campaign = ContentService::create_campaign(
        pool,
        &CreateCampaign {
            name: "Spring".to_string(),
            description: None,
        },
    )
    .await
    .unwrap();
    ContentService::create_content_piece(pool, &new_piece(campaign.id))
        .await
        .unwrap()
}

pub fn new_draft(content_piece_id: i64, title: &str, body: &str) -> CreateDraft {
    CreateDraft {
        content_piece_id,
        model_used: "gpt-4o".to_string(),
        generation_type: GenerationType::Variation,
        content: GeneratedContent {
            title: Some(title.to_string()),
            description: None,
            body: Some(body.to_string()),
            extra: None,
        },
        prompt: Some("Write a teaser".to_string()),
        temperature: Some(0.7),
        max_tokens: Some(256),
        cost: Some(0.01),
        response_time_ms: Some(900),
        token_count: Some(64),
        quality_score: None,
        confidence_score: None,
        select: false,
    }
}

pub fn approve_by(reviewer: Reviewer) -> ApproveRequest {
    ApproveRequest {
        reviewer: Some(reviewer),
        comments: None,
        publish_immediately: None,
    }
}

/// Take a fresh piece through submit and approve.
pub async fn approved_piece(pool: &PgPool) -> ContentPiece {
    let piece = create_piece(pool).await;
    ReviewWorkflow::submit_for_review(pool, piece.id, &SubmitRequest::default())
        .await
        .unwrap();
    ReviewWorkflow::approve(pool, piece.id, &approve_by(editor()))
        .await
        .unwrap()
}

pub fn german(content: &str) -> CreateTranslation {
    CreateTranslation {
        target_language: "de".to_string(),
        title: Some("Frühlingsstart".to_string()),
        description: None,
        content: content.to_string(),
        model_used: "gpt-4o".to_string(),
        ai_metadata: None,
        materialize: false,
    }
}
