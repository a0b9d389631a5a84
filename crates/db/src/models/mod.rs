//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for the requests that create or change it

pub mod ai_draft;
pub mod campaign;
pub mod content_piece;
pub mod content_version;
pub mod review;
pub mod translation;
