//! Trace domain model

use crate::shared::models::StateMap;
use serde::{Deserialize, Serialize};

/// One observation: bindings in effect after `line_number` ran
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEvent {
    pub line_number: u32,
    pub bindings: StateMap,
}

impl TraceEvent {
    pub fn new(line_number: u32, bindings: StateMap) -> Self {
        Self {
            line_number,
            bindings,
        }
    }
}

/// Terminal exception of an abnormal run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionInfo {
    /// Class repr, e.g. `<class 'TypeError'>`
    pub class: String,
    /// Constructor repr, e.g. `TypeError("unsupported operand")`
    pub message: String,
    pub line: u32,
}

impl ExceptionInfo {
    /// Bare class name: `<class 'TypeError'>` → `TypeError`
    pub fn class_name(&self) -> &str {
        self.class
            .strip_prefix("<class '")
            .and_then(|rest| rest.strip_suffix("'>"))
            .unwrap_or(&self.class)
    }
}

/// Parsed instrumentation log
///
/// When the run raised, the post-mortem state is the last event and
/// `exception` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionTrace {
    pub execution_order: Vec<u32>,
    pub events: Vec<TraceEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception: Option<ExceptionInfo>,
}

impl ExecutionTrace {
    pub fn is_exceptional(&self) -> bool {
        self.exception.is_some()
    }
}

/// One step of the block-level trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockExecutionEntry {
    pub block_id: u32,
    pub state: StateMap,
}

/// Block-level trace; no two adjacent entries share a block id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedTrace {
    pub entries: Vec<BlockExecutionEntry>,
    /// Executed lines that got an empty state because the event at the same
    /// position was missing or belonged to another line
    pub desynced: usize,
}

impl AlignedTrace {
    pub fn block_order(&self) -> Vec<u32> {
        self.entries.iter().map(|e| e.block_id).collect()
    }

    pub fn has_adjacent_repeats(&self) -> bool {
        self.entries.windows(2).any(|w| w[0].block_id == w[1].block_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exception_class_name() {
        let info = ExceptionInfo {
            class: "<class 'TypeError'>".to_string(),
            message: "TypeError('bad')".to_string(),
            line: 3,
        };
        assert_eq!(info.class_name(), "TypeError");

        let bare = ExceptionInfo {
            class: "ValueError".to_string(),
            ..info
        };
        assert_eq!(bare.class_name(), "ValueError");
    }
}
