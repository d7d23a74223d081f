//! Scoring of predicted executions against the ground truth

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{GroundTruth, ScoreSubmissionUseCase, ScoreSummary};
pub use domain::{Literal, PredictedExecution, RecallPrecision, ScoreRecord};
pub use infrastructure::{ExecutionComparator, PredictionParser};
