//! Corpus-level summary
//!
//! Means over defined metric values plus instance-level error detection
//! counts (an instance is buggy when its ground truth raised).

use crate::features::scoring::domain::ScoreRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricMeans {
    pub exact_match: Option<f64>,
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
    pub error_type: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionCounts {
    pub true_positive: usize,
    pub false_positive: usize,
    pub false_negative: usize,
    pub true_negative: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub instances: usize,
    pub buggy: usize,
    pub non_buggy: usize,
    pub means: MetricMeans,
    /// Correctly located errors over buggy instances
    pub error_location_rate: Option<f64>,
    pub detection: DetectionCounts,
    pub true_positive_rate: Option<f64>,
    pub false_positive_rate: Option<f64>,
    pub false_negative_rate: Option<f64>,
    pub true_negative_rate: Option<f64>,
    pub detection_accuracy: Option<f64>,
}

fn mean(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, count) = values
        .flatten()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

fn rate(count: usize, total: usize) -> Option<f64> {
    (total > 0).then(|| count as f64 / total as f64)
}

impl ScoreSummary {
    pub fn from_records(records: &[ScoreRecord]) -> Self {
        let metric = |f: fn(&ScoreRecord) -> Option<f64>| mean(records.iter().map(f));

        let means = MetricMeans {
            exact_match: metric(|r| r.exact_match.map(f64::from)),
            coverage_recall: metric(|r| r.coverage_recall),
            coverage_precision: metric(|r| r.coverage_precision),
            prefix_recall: metric(|r| r.prefix_recall),
            prefix_precision: metric(|r| r.prefix_precision),
            transition_recall: metric(|r| r.transition_recall),
            transition_precision: metric(|r| r.transition_precision),
            statement_coverage_recall: metric(|r| r.statement_coverage_recall),
            statement_coverage_precision: metric(|r| r.statement_coverage_precision),
            statement_prefix_recall: metric(|r| r.statement_prefix_recall),
            statement_prefix_precision: metric(|r| r.statement_prefix_precision),
            symbol_table: metric(|r| r.symbol_table),
            error_type: metric(|r| r.error_type.map(f64::from)),
        };

        let mut detection = DetectionCounts::default();
        let mut located = 0usize;
        for record in records {
            match (record.actual_error, record.predicted_error) {
                (true, true) => detection.true_positive += 1,
                (false, false) => detection.true_negative += 1,
                (false, true) => detection.false_positive += 1,
                (true, false) => detection.false_negative += 1,
            }
            if record.error_location == Some(1) {
                located += 1;
            }
        }

        let buggy = records.iter().filter(|r| r.actual_error).count();
        let non_buggy = records.len() - buggy;

        Self {
            instances: records.len(),
            buggy,
            non_buggy,
            means,
            error_location_rate: rate(located, buggy),
            detection,
            true_positive_rate: rate(detection.true_positive, buggy),
            false_positive_rate: rate(detection.false_positive, non_buggy),
            false_negative_rate: rate(detection.false_negative, buggy),
            true_negative_rate: rate(detection.true_negative, non_buggy),
            detection_accuracy: rate(
                detection.true_positive + detection.true_negative,
                records.len(),
            ),
        }
    }
}
