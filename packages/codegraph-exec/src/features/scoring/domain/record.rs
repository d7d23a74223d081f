//! Scores

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecallPrecision {
    pub recall: f64,
    pub precision: f64,
}

impl RecallPrecision {
    pub fn new(recall: f64, precision: f64) -> Self {
        Self { recall, precision }
    }

    /// `matched / reference` and `matched / predicted`
    pub fn ratio(matched: usize, reference: usize, predicted: usize) -> Self {
        Self::new(
            matched as f64 / reference as f64,
            matched as f64 / predicted as f64,
        )
    }
}

/// Flat per-submission score; `None` marks a metric that is undefined here
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub exact_match: Option<u8>,
    pub coverage_recall: Option<f64>,
    pub coverage_precision: Option<f64>,
    pub prefix_recall: Option<f64>,
    pub prefix_precision: Option<f64>,
    pub transition_recall: Option<f64>,
    pub transition_precision: Option<f64>,
    pub statement_coverage_recall: Option<f64>,
    pub statement_coverage_precision: Option<f64>,
    pub statement_prefix_recall: Option<f64>,
    pub statement_prefix_precision: Option<f64>,
    pub symbol_table: Option<f64>,
    pub error_location: Option<u8>,
    pub error_type: Option<u8>,
    /// Whether the predictor claimed the run raises
    pub predicted_error: bool,
    /// Whether the ground truth run raised
    pub actual_error: bool,
}

impl ScoreRecord {
    pub fn set_coverage(&mut self, value: Option<RecallPrecision>) {
        self.coverage_recall = value.map(|v| v.recall);
        self.coverage_precision = value.map(|v| v.precision);
    }

    pub fn set_prefix(&mut self, value: Option<RecallPrecision>) {
        self.prefix_recall = value.map(|v| v.recall);
        self.prefix_precision = value.map(|v| v.precision);
    }

    pub fn set_transition(&mut self, value: Option<RecallPrecision>) {
        self.transition_recall = value.map(|v| v.recall);
        self.transition_precision = value.map(|v| v.precision);
    }

    pub fn set_statement_coverage(&mut self, value: Option<RecallPrecision>) {
        self.statement_coverage_recall = value.map(|v| v.recall);
        self.statement_coverage_precision = value.map(|v| v.precision);
    }

    pub fn set_statement_prefix(&mut self, value: Option<RecallPrecision>) {
        self.statement_prefix_recall = value.map(|v| v.recall);
        self.statement_prefix_precision = value.map(|v| v.precision);
    }
}
