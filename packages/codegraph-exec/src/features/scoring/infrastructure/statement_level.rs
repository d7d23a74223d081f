//! Statement-level metrics
//!
//! A block sequence expands into the lines each block covers, so statement
//! coverage and statement prefix are the block metrics on those lines.

use super::comparator::{coverage, prefix};
use crate::features::flow_graph::domain::CanonicalCfg;
use crate::features::scoring::domain::RecallPrecision;

/// Lines covered by each visited block, in visiting order
///
/// Ids that name no block contribute nothing.
pub fn blocks_to_statements(cfg: &CanonicalCfg, block_order: &[u32]) -> Vec<u32> {
    block_order
        .iter()
        .filter_map(|&id| cfg.block(id))
        .flat_map(|block| block.range.lines())
        .collect()
}

pub fn statement_coverage(cfg: &CanonicalCfg, p: &[u32], g: &[u32]) -> Option<RecallPrecision> {
    coverage(&blocks_to_statements(cfg, p), &blocks_to_statements(cfg, g))
}

pub fn statement_prefix(cfg: &CanonicalCfg, p: &[u32], g: &[u32]) -> Option<RecallPrecision> {
    prefix(&blocks_to_statements(cfg, p), &blocks_to_statements(cfg, g))
}
