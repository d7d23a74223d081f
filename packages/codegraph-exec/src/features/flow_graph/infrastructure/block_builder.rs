//! Block collection
//!
//! Walks the raw CFG from the function-entry block onward and turns every
//! non-empty block into a [`ProvisionalBlock`] keyed by its first line.

use super::statement_classifier::StatementClassifier;
use crate::config::CfgConfig;
use crate::errors::Result;
use crate::features::flow_graph::domain::{ProvisionalBlock, RawBlock, RawCfg};
use crate::shared::models::LineRange;
use std::collections::BTreeMap;
use tracing::debug;

/// Blocks collected from one raw CFG
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectedBlocks {
    /// Provisional id (first line) → block
    pub blocks: BTreeMap<u32, ProvisionalBlock>,
    /// `(raw block index, provisional id)` in raw order
    pub members: Vec<(usize, u32)>,
}

impl CollectedBlocks {
    pub fn ranges(&self) -> impl Iterator<Item = (u32, LineRange)> + '_ {
        self.blocks.iter().map(|(id, b)| (*id, b.range))
    }
}

pub struct BlockBuilder<'a> {
    config: &'a CfgConfig,
}

impl<'a> BlockBuilder<'a> {
    pub fn new(config: &'a CfgConfig) -> Self {
        Self { config }
    }

    /// Raw blocks that take part in canonicalization, with their indices
    ///
    /// Starts at the entry-labelled block and skips blocks without nodes.
    pub fn eligible<'c>(&self, cfg: &'c RawCfg) -> Vec<(usize, &'c RawBlock)> {
        let Some(entry) = cfg.position_of(&self.config.entry_label) else {
            return Vec::new();
        };

        cfg.blocks
            .iter()
            .enumerate()
            .skip(entry)
            .filter(|(_, block)| !block.nodes.is_empty())
            .filter(|(_, block)| !(self.config.exclude_raise_successors && self.leads_to_raise(cfg, block)))
            .collect()
    }

    fn leads_to_raise(&self, cfg: &RawCfg, block: &RawBlock) -> bool {
        block
            .next
            .iter()
            .filter_map(|&i| cfg.block(i))
            .any(|next| next.has_label(&self.config.raise_label))
    }

    /// Collect and classify every eligible block
    ///
    /// Any statement that fails to classify fails the whole build.
    pub fn build(&self, cfg: &RawCfg, source: &str) -> Result<CollectedBlocks> {
        let classifier = StatementClassifier::new(source)?;
        let mut collected = CollectedBlocks::default();

        for (index, block) in self.eligible(cfg) {
            let lines = block.scope(self.config.line_offset);
            let Some(range) = LineRange::spanning(&lines) else {
                continue;
            };

            let statements = lines
                .iter()
                .map(|&line| classifier.classify(line))
                .collect::<Result<Vec<_>>>()?;

            collected.members.push((index, range.start));
            collected
                .blocks
                .insert(range.start, ProvisionalBlock { range, statements });
        }

        debug!(
            "Collected {} blocks from {} raw blocks",
            collected.blocks.len(),
            cfg.blocks.len()
        );
        Ok(collected)
    }
}
