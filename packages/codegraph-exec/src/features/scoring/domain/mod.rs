pub mod literal;
mod prediction;
mod record;

pub use literal::{split_dict_entries, Literal, LiteralError};
pub use prediction::{PredictedError, PredictedExecution, PredictedState};
pub use record::{RecallPrecision, ScoreRecord};
