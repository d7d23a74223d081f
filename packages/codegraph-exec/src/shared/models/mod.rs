//! Shared models

mod line_range;
mod state;

pub use line_range::LineRange;
pub use state::StateMap;
