//! Scoring infrastructure

pub mod comparator;
pub mod prediction_parser;
pub mod statement_level;
pub mod symbol_table;

pub use comparator::{coverage, error_location, exact_match, prefix, transition, ExecutionComparator};
pub use prediction_parser::PredictionParser;
pub use statement_level::{blocks_to_statements, statement_coverage, statement_prefix};
pub use symbol_table::symbol_table_accuracy;
