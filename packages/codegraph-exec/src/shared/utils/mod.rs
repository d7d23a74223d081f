//! Utility modules shared across features
//!
//! - `tree_sitter`: Tree-sitter parsing, traversal and text extraction

pub mod tree_sitter;
