//! Trace alignment
//!
//! Projects the line-level trace onto canonical blocks.

use crate::features::flow_graph::domain::CanonicalCfg;
use crate::features::trace::domain::{AlignedTrace, BlockExecutionEntry, ExecutionTrace};
use crate::shared::models::StateMap;
use tracing::debug;

pub struct TraceAligner;

impl TraceAligner {
    /// Pair executed lines with events by position, then map onto blocks
    ///
    /// A missing event, or one on a different line than the executed line at
    /// the same position, yields an empty state; no re-synchronization is
    /// attempted.
    /// Lines outside every block are skipped. A repeat of the previous block
    /// replaces that entry's state.
    pub fn align(cfg: &CanonicalCfg, trace: &ExecutionTrace) -> AlignedTrace {
        let mut aligned = AlignedTrace::default();

        for (index, &line) in trace.execution_order.iter().enumerate() {
            let state = match trace.events.get(index) {
                Some(event) if event.line_number == line => event.bindings.clone(),
                _ => {
                    aligned.desynced += 1;
                    StateMap::new()
                }
            };

            let Some(block) = cfg.block_containing(line) else {
                continue;
            };

            match aligned.entries.last_mut() {
                Some(last) if last.block_id == block.id => last.state = state,
                _ => aligned.entries.push(BlockExecutionEntry {
                    block_id: block.id,
                    state,
                }),
            }
        }

        if aligned.desynced > 0 {
            debug!(
                "{} of {} executed lines had no matching event",
                aligned.desynced,
                trace.execution_order.len()
            );
        }
        aligned
    }
}
