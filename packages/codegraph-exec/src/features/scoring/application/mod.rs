mod score_submission;
mod summary;

pub use score_submission::{GroundTruth, ScoreSubmissionUseCase};
pub use summary::{DetectionCounts, MetricMeans, ScoreSummary};
