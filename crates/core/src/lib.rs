//! Pure domain logic for the content workflow.
//!
//! Nothing in this crate touches the database. Repositories and the
//! workflow layer load rows, hand plain values in here, and persist
//! whatever comes back.

pub mod audit;
pub mod content;
pub mod draft;
pub mod error;
pub mod quality;
pub mod review;
pub mod translation_gate;
pub mod types;

mod macros;
