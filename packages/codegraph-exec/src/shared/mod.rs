//! Shared module - Common types and utilities
//!
//! Types used by more than one feature. Only `utils::tree_sitter` touches
//! the parser.

pub mod models;
pub mod utils;

// Re-exports for convenience
pub use models::*;
