//! CFG text rendering
//!
//! ```text
//! Block 1:
//! Statements:
//!     x = 1
//!     (x > 0)
//! Next:
//!     If True: Go to Block 2
//!     <END>
//! ```
//!
//! Each block is preceded by a blank line. A block whose statement count
//! disagrees with its range aborts the whole rendering.

use crate::errors::{ExecError, Result};
use crate::features::flow_graph::domain::{BlockTarget, CanonicalBlock, CanonicalCfg, Transition, END_SENTINEL};
use std::fmt::Write;
use tracing::debug;

const INDENT: &str = "    ";

pub struct CfgSerializer;

impl CfgSerializer {
    /// Render `cfg`, or the empty string when any block is inconsistent
    pub fn serialize(cfg: &CanonicalCfg) -> String {
        Self::try_serialize(cfg).unwrap_or_default()
    }

    /// Render `cfg`, reporting the first inconsistent block
    pub fn try_serialize(cfg: &CanonicalCfg) -> Result<String> {
        let mut out = String::new();
        for block in &cfg.blocks {
            if !block.is_consistent() {
                debug!(
                    "Block {} has {} statements for range {}..={}, dropping CFG text",
                    block.id,
                    block.statements.len(),
                    block.range.start,
                    block.range.end
                );
                return Err(ExecError::StructuralMismatch {
                    block_id: block.id,
                    statements: block.statements.len(),
                    expected: block.range.line_count(),
                });
            }
            Self::write_block(&mut out, block, cfg.transition(block.id));
        }
        Ok(out)
    }

    fn write_block(out: &mut String, block: &CanonicalBlock, transition: Option<&Transition>) {
        let _ = write!(out, "\nBlock {}:\nStatements:", block.id);
        for statement in &block.statements {
            let _ = write!(out, "\n{}{}", INDENT, statement);
        }
        out.push_str("\nNext:\n");

        let Some(t) = transition else {
            // No entry: last block
            Self::write_line(out, END_SENTINEL);
            return;
        };

        if let Some(target) = t.on_true {
            Self::write_arm(out, "If True: ", target);
        }
        if let Some(target) = t.on_false {
            Self::write_arm(out, "If False: ", target);
        }
        if t.on_true.is_none() && t.on_false.is_none() {
            match t.unconditional {
                Some(BlockTarget::Block(id)) => Self::write_line(out, &format!("Go to Block {}", id)),
                _ => Self::write_line(out, END_SENTINEL),
            }
        }
    }

    fn write_arm(out: &mut String, prefix: &str, target: BlockTarget) {
        match target {
            BlockTarget::Block(id) => Self::write_line(out, &format!("{}Go to Block {}", prefix, id)),
            BlockTarget::End => Self::write_line(out, END_SENTINEL),
        }
    }

    fn write_line(out: &mut String, line: &str) {
        out.push_str(INDENT);
        out.push_str(line);
        out.push('\n');
    }
}
