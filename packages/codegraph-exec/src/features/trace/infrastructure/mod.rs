//! Trace infrastructure

pub mod aligner;
pub mod log_parser;

pub use aligner::TraceAligner;
pub use log_parser::TraceLogParser;
