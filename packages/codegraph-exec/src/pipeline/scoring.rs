//! Corpus-wide scoring of predictor outputs

use crate::config::ScoringConfig;
use crate::features::scoring::application::{GroundTruth, ScoreSubmissionUseCase, ScoreSummary};
use crate::features::scoring::domain::ScoreRecord;
use crate::features::scoring::infrastructure::PredictionParser;
use crate::pipeline::batch::BatchReport;
use crate::pipeline::corpus::Corpus;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Raw predictor outputs, `problem_id → submission_id → text`
pub type Predictions = BTreeMap<String, BTreeMap<String, String>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSubmission {
    pub problem_id: String,
    pub submission_id: String,
    pub record: ScoreRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusScores {
    pub records: Vec<ScoredSubmission>,
    pub summary: ScoreSummary,
    /// Unparseable predictor outputs are discarded here
    pub report: BatchReport,
}

/// Score every corpus entry that has a prediction
///
/// Entries without a prediction are skipped silently.
pub fn score_corpus(corpus: &Corpus, predictions: &Predictions, config: &ScoringConfig) -> CorpusScores {
    let jobs: Vec<_> = corpus
        .iter()
        .filter_map(|(problem, submission, entry)| {
            let output = predictions.get(problem)?.get(submission)?;
            Some((problem, submission, entry, output))
        })
        .collect();

    let use_case = ScoreSubmissionUseCase::new(config);
    let outcomes: Vec<_> = jobs
        .par_iter()
        .map(|&(problem, submission, entry, output)| {
            let record = PredictionParser::parse(output).map(|prediction| {
                let truth = GroundTruth {
                    cfg: &entry.cfg,
                    entries: &entry.ground_truth,
                    exception: entry.exception.as_ref(),
                };
                use_case.execute(&truth, &prediction)
            });
            (problem, submission, record)
        })
        .collect();

    let mut report = BatchReport::default();
    let mut records = Vec::with_capacity(outcomes.len());
    for (problem, submission, outcome) in outcomes {
        match outcome {
            Ok(record) => {
                report.record_success();
                records.push(ScoredSubmission {
                    problem_id: problem.to_string(),
                    submission_id: submission.to_string(),
                    record,
                });
            }
            Err(err) => {
                debug!("Unparseable prediction for {}/{}: {}", problem, submission, err);
                report.record_discard(err.discard_reason());
            }
        }
    }

    let flat: Vec<ScoreRecord> = records.iter().map(|s| s.record.clone()).collect();
    let summary = ScoreSummary::from_records(&flat);
    info!(
        "Scored {} predictions ({} unparseable)",
        report.succeeded,
        report.discarded()
    );

    CorpusScores {
        records,
        summary,
        report,
    }
}
