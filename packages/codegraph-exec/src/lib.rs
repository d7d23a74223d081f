/*
 * Codegraph Exec - Execution Reasoning Benchmark Engine
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (LineRange, StateMap) and tree-sitter helpers
 * - features/    : Vertical slices (flow_graph → trace → scoring)
 * - pipeline/    : Batch orchestration and the persisted corpus
 * - config/      : YAML-loadable configuration
 *
 * Performance:
 * - Rayon work-stealing across submissions
 * - Collaborator calls bounded by a wall-clock budget
 */

// Crate-level lint configuration
#![allow(clippy::too_many_arguments)] // Metric helpers take parallel sequences
#![allow(clippy::type_complexity)] // Nested corpus maps
#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Configuration (defaults + YAML v1)
pub mod config;

/// Error types and discard reasons
pub mod errors;

/// Vertical feature slices
pub mod features;

/// Batch orchestration
pub mod pipeline;

/// Shared models and utilities
pub mod shared;

// Re-exports
pub use config::ExecConfig;
pub use errors::{DiscardReason, ExecError, Result};
pub use features::flow_graph::{CanonicalCfg, CanonicalizeCfgUseCase, CfgProvider, CfgSerializer, RawCfg};
pub use features::scoring::{PredictionParser, ScoreRecord, ScoreSummary};
pub use features::trace::{AlignedTrace, ExecutionTrace, TraceAligner, TraceLogParser, TraceProvider};
pub use pipeline::{score_corpus, BatchProcessor, BatchReport, Corpus, CorpusEntry, Submission, SubmissionProcessor};
