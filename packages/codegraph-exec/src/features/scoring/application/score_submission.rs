use crate::config::ScoringConfig;
use crate::features::flow_graph::domain::CanonicalCfg;
use crate::features::scoring::domain::{PredictedExecution, ScoreRecord};
use crate::features::scoring::infrastructure::{
    coverage, error_location, exact_match, prefix, statement_coverage, statement_prefix,
    symbol_table_accuracy, transition, ExecutionComparator,
};
use crate::features::trace::domain::{BlockExecutionEntry, ExceptionInfo};

/// Ground truth of one submission, as stored in the corpus
pub struct GroundTruth<'a> {
    pub cfg: &'a CanonicalCfg,
    pub entries: &'a [BlockExecutionEntry],
    pub exception: Option<&'a ExceptionInfo>,
}

pub struct ScoreSubmissionUseCase<'a> {
    config: &'a ScoringConfig,
}

impl<'a> ScoreSubmissionUseCase<'a> {
    pub fn new(config: &'a ScoringConfig) -> Self {
        Self { config }
    }

    /// Score one prediction
    ///
    /// Block metrics need a non-empty predicted walk; error metrics need both
    /// an error type and an error block from the predictor.
    pub fn execute(&self, truth: &GroundTruth<'_>, prediction: &PredictedExecution) -> ScoreRecord {
        let actual: Vec<u32> = truth.entries.iter().map(|e| e.block_id).collect();
        let predicted = &prediction.block_order;

        let mut record = ScoreRecord {
            predicted_error: prediction.error.is_error,
            actual_error: truth.exception.is_some(),
            ..ScoreRecord::default()
        };

        if !predicted.is_empty() {
            record.exact_match = Some(exact_match(predicted, &actual));
            record.set_coverage(coverage(predicted, &actual));
            record.set_prefix(prefix(predicted, &actual));
            record.set_transition(transition(predicted, &actual));
            record.set_statement_coverage(statement_coverage(truth.cfg, predicted, &actual));
            record.set_statement_prefix(statement_prefix(truth.cfg, predicted, &actual));
            record.symbol_table = symbol_table_accuracy(
                &prediction.states,
                truth.entries,
                self.config.strict_symbol_table,
            );
        }

        if let (Some(label), Some(block)) = (&prediction.error.error_type, prediction.error.error_block) {
            record.error_location = error_location(&[block], &actual);
            record.error_type = ExecutionComparator::new(self.config)
                .error_type(label, truth.exception.map(|e| e.class.as_str()));
        }

        record
    }
}
