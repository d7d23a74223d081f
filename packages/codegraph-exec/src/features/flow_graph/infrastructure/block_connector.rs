//! Block connection
//!
//! Resolves each collected block's successors by matching the successor's
//! line span exactly against the collected block ranges.

use super::block_builder::CollectedBlocks;
use crate::config::CfgConfig;
use crate::errors::{ExecError, Result};
use crate::features::flow_graph::domain::{BlockTarget, RawCfg, Transition};
use crate::shared::models::LineRange;
use std::collections::BTreeMap;
use tracing::warn;

pub struct BlockConnector<'a> {
    config: &'a CfgConfig,
}

impl<'a> BlockConnector<'a> {
    pub fn new(config: &'a CfgConfig) -> Self {
        Self { config }
    }

    /// Transition table keyed by provisional block id
    pub fn connect(&self, cfg: &RawCfg, collected: &CollectedBlocks) -> Result<BTreeMap<u32, Transition>> {
        let mut table = BTreeMap::new();

        for &(index, block_id) in &collected.members {
            let Some(block) = cfg.block(index) else {
                continue;
            };

            let transition = match block.branches {
                Some(branches) => {
                    let on_true = self.scope_of(cfg, &[branches.on_true]);
                    let on_false = self.scope_of(cfg, &[branches.on_false]);
                    Transition::conditional(
                        self.resolve_arm(block_id, &on_true, collected)?,
                        self.resolve_arm(block_id, &on_false, collected)?,
                    )
                }
                None => {
                    let scope = self.scope_of(cfg, &block.next);
                    let target = match LineRange::spanning(&scope) {
                        Some(range) => self.lookup(block_id, range, collected)?,
                        None => None,
                    };
                    Transition::unconditional(target)
                }
            };
            table.insert(block_id, transition);
        }

        Ok(table)
    }

    fn scope_of(&self, cfg: &RawCfg, indices: &[usize]) -> Vec<u32> {
        indices
            .iter()
            .filter_map(|&i| cfg.block(i))
            .flat_map(|b| b.scope(self.config.line_offset))
            .collect()
    }

    /// Empty arm leaves the function
    fn resolve_arm(
        &self,
        block_id: u32,
        scope: &[u32],
        collected: &CollectedBlocks,
    ) -> Result<Option<BlockTarget>> {
        match LineRange::spanning(scope) {
            Some(range) => self.lookup(block_id, range, collected),
            None => Ok(Some(BlockTarget::End)),
        }
    }

    fn lookup(&self, block_id: u32, range: LineRange, collected: &CollectedBlocks) -> Result<Option<BlockTarget>> {
        if let Some((target, _)) = collected.ranges().find(|(_, r)| *r == range) {
            return Ok(Some(BlockTarget::Block(target)));
        }

        warn!(
            "Block {} points at lines {}..={}, which match no block",
            block_id, range.start, range.end
        );
        if self.config.discard_unresolved_edges {
            return Err(ExecError::UnresolvedScope {
                block_id,
                start: range.start,
                end: range.end,
            });
        }
        Ok(None)
    }
}
