//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Writes that must commit together
//! with writes to other tables take `&mut Transaction<'_, Postgres>`
//! instead and leave commit to the caller.

pub mod ai_draft_repo;
pub mod campaign_repo;
pub mod content_piece_repo;
pub mod content_version_repo;
pub mod review_repo;
pub mod translation_repo;

pub use ai_draft_repo::AiDraftRepo;
pub use campaign_repo::CampaignRepo;
pub use content_piece_repo::ContentPieceRepo;
pub use content_version_repo::ContentVersionRepo;
pub use review_repo::ReviewRepo;
pub use translation_repo::TranslationRepo;
