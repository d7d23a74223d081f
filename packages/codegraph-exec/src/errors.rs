//! Error types for codegraph-exec
//!
//! Every failure is local to one submission. The orchestrator turns an
//! [`ExecError`] into a [`DiscardReason`] and tallies it; nothing is retried.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a submission (or a single scoring instance) was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscardReason {
    /// Serialized block disagrees with its own line range
    StructuralMismatch,
    /// A branch range matched no known block (only when the caller opts in)
    UnresolvedScope,
    /// Source, raw log, or predictor output lacked required structure
    ParseFailure,
    /// An external collaborator exceeded its wall-clock budget
    Timeout,
    /// An external collaborator crashed or refused the input
    ExternalFailure,
    /// Reading or writing persisted documents failed
    Io,
}

impl DiscardReason {
    pub const ALL: [DiscardReason; 6] = [
        DiscardReason::StructuralMismatch,
        DiscardReason::UnresolvedScope,
        DiscardReason::ParseFailure,
        DiscardReason::Timeout,
        DiscardReason::ExternalFailure,
        DiscardReason::Io,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DiscardReason::StructuralMismatch => "structural_mismatch",
            DiscardReason::UnresolvedScope => "unresolved_scope",
            DiscardReason::ParseFailure => "parse_failure",
            DiscardReason::Timeout => "timeout",
            DiscardReason::ExternalFailure => "external_failure",
            DiscardReason::Io => "io",
        }
    }
}

/// Main error type for codegraph-exec operations
#[derive(Debug, Error)]
pub enum ExecError {
    /// A source line could not be rendered as a canonical statement
    #[error("Cannot classify line {line}: {reason}")]
    Classification { line: u32, reason: String },

    /// Statement count disagrees with the block's line range
    #[error("Block {block_id} has {statements} statements but spans {expected} lines")]
    StructuralMismatch {
        block_id: u32,
        statements: usize,
        expected: usize,
    },

    /// Branch target range matches no block
    #[error("Block {block_id} points at lines {start}..={end}, which match no block")]
    UnresolvedScope { block_id: u32, start: u32, end: u32 },

    /// Raw instrumentation log or predictor output is malformed
    #[error("Parse error: {0}")]
    LogParse(String),

    /// External collaborator timed out
    #[error("{stage} timed out after {seconds}s")]
    Timeout { stage: String, seconds: u64 },

    /// External collaborator failed
    #[error("{stage} failed: {message}")]
    External { stage: String, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ExecError {
    /// Create a log/output parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        ExecError::LogParse(msg.into())
    }

    /// Create a classification error for a source line
    pub fn classification(line: u32, reason: impl Into<String>) -> Self {
        ExecError::Classification {
            line,
            reason: reason.into(),
        }
    }

    /// Create an external collaborator error
    pub fn external(stage: impl Into<String>, message: impl Into<String>) -> Self {
        ExecError::External {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Category used by the batch orchestrator to tally discards
    pub fn discard_reason(&self) -> DiscardReason {
        match self {
            ExecError::StructuralMismatch { .. } => DiscardReason::StructuralMismatch,
            ExecError::UnresolvedScope { .. } => DiscardReason::UnresolvedScope,
            ExecError::Classification { .. } | ExecError::LogParse(_) => {
                DiscardReason::ParseFailure
            }
            ExecError::Timeout { .. } => DiscardReason::Timeout,
            ExecError::External { .. } => DiscardReason::ExternalFailure,
            ExecError::Io(_) | ExecError::Json(_) | ExecError::Config(_) => DiscardReason::Io,
        }
    }
}

/// Result type alias for codegraph-exec operations
pub type Result<T> = std::result::Result<T, ExecError>;
