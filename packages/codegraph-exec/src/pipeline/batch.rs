//! Parallel batch orchestration
//!
//! Submissions are independent; each one either lands in the corpus or is
//! tallied under its [`DiscardReason`]. Nothing is retried.

use crate::errors::{DiscardReason, ExecError, Result};
use crate::pipeline::corpus::{Corpus, Submission};
use crate::pipeline::processor::SubmissionProcessor;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Outcome counters for one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub processed: usize,
    pub succeeded: usize,
    pub discards: BTreeMap<DiscardReason, usize>,
}

impl BatchReport {
    pub fn record_success(&mut self) {
        self.processed += 1;
        self.succeeded += 1;
    }

    pub fn record_discard(&mut self, reason: DiscardReason) {
        self.processed += 1;
        *self.discards.entry(reason).or_insert(0) += 1;
    }

    pub fn merge(&mut self, other: BatchReport) {
        self.processed += other.processed;
        self.succeeded += other.succeeded;
        for (reason, count) in other.discards {
            *self.discards.entry(reason).or_insert(0) += count;
        }
    }

    pub fn discarded(&self) -> usize {
        self.discards.values().sum()
    }

    pub fn discards_for(&self, reason: DiscardReason) -> usize {
        self.discards.get(&reason).copied().unwrap_or(0)
    }
}

pub struct BatchProcessor {
    processor: SubmissionProcessor,
}

impl BatchProcessor {
    pub fn new(processor: SubmissionProcessor) -> Self {
        Self { processor }
    }

    /// Process every submission on a dedicated pool
    ///
    /// Errors only when the pool itself cannot be built.
    pub fn run(&self, submissions: &[Submission]) -> Result<(Corpus, BatchReport)> {
        let threads = self.processor.config().batch.effective_threads();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| ExecError::external("batch", e.to_string()))?;

        let outcomes: Vec<_> = pool.install(|| {
            submissions
                .par_iter()
                .map(|submission| (submission, self.processor.process(submission)))
                .collect()
        });

        let mut corpus = Corpus::new();
        let mut report = BatchReport::default();
        for (submission, outcome) in outcomes {
            match outcome {
                Ok(entry) => {
                    corpus.insert(&submission.problem_id, &submission.submission_id, entry);
                    report.record_success();
                }
                Err(err) => {
                    warn!(
                        "Discarding {}/{}: {}",
                        submission.problem_id, submission.submission_id, err
                    );
                    report.record_discard(err.discard_reason());
                }
            }
        }

        info!(
            "Batch finished: {} processed, {} kept, {} discarded on {} threads",
            report.processed,
            report.succeeded,
            report.discarded(),
            threads
        );
        Ok((corpus, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_merge() {
        let mut a = BatchReport::default();
        a.record_success();
        a.record_discard(DiscardReason::Timeout);

        let mut b = BatchReport::default();
        b.record_discard(DiscardReason::Timeout);
        b.record_discard(DiscardReason::ParseFailure);

        a.merge(b);
        assert_eq!(a.processed, 4);
        assert_eq!(a.succeeded, 1);
        assert_eq!(a.discarded(), 3);
        assert_eq!(a.discards_for(DiscardReason::Timeout), 2);
        assert_eq!(a.discards_for(DiscardReason::Io), 0);
    }

    #[test]
    fn test_report_serializes_reason_labels() {
        let mut report = BatchReport::default();
        report.record_discard(DiscardReason::StructuralMismatch);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"structural_mismatch\":1"));
    }
}
