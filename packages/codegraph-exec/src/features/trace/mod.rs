//! Execution trace extraction
//!
//! Raw instrumentation log → line-level [`ExecutionTrace`] → block-level
//! [`AlignedTrace`] (the ground truth scored against predictions).

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::{AlignedTrace, BlockExecutionEntry, ExceptionInfo, ExecutionTrace, TraceEvent};
pub use infrastructure::{TraceAligner, TraceLogParser};
pub use ports::TraceProvider;
