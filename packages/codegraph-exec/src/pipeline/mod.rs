//! Batch pipeline
//!
//! Submission → [`SubmissionProcessor`] → [`Corpus`] entry, fanned out by
//! [`BatchProcessor`]; [`score_corpus`] compares predictor outputs against
//! the stored ground truth.

pub mod batch;
pub mod corpus;
pub mod processor;
pub mod scoring;

pub use batch::{BatchProcessor, BatchReport};
pub use corpus::{Corpus, CorpusEntry, Submission};
pub use processor::SubmissionProcessor;
pub use scoring::{score_corpus, CorpusScores, Predictions, ScoredSubmission};
