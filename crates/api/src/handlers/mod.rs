pub mod campaign;
pub mod content;
pub mod draft;
pub mod review;
pub mod translation;
pub mod version;
