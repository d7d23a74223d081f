//! Block renumbering
//!
//! Maps provisional ids (first lines) onto `1..=N` and repairs the loop
//! header that the raw CFG sometimes emits at the tail of one block and the
//! head of the next.

use crate::features::flow_graph::domain::{CanonicalBlock, CanonicalCfg, ProvisionalBlock, Transition};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Substring shared by both loop-header renderings
const ITERATOR_MARKER: &str = "iterator";

pub struct BlockRenumberer;

impl BlockRenumberer {
    /// Renumber blocks and transitions, then apply the loop-header merge
    ///
    /// Targets that name no known block become `None`; `End` is kept.
    pub fn renumber(
        blocks: &BTreeMap<u32, ProvisionalBlock>,
        transitions: &BTreeMap<u32, Transition>,
    ) -> CanonicalCfg {
        let mapping: HashMap<u32, u32> = blocks
            .keys()
            .enumerate()
            .map(|(i, &old)| (old, i as u32 + 1))
            .collect();

        let mut canonical = CanonicalCfg {
            blocks: blocks
                .values()
                .enumerate()
                .map(|(i, b)| CanonicalBlock::new(i as u32 + 1, b.range, b.statements.clone()))
                .collect(),
            transitions: transitions
                .iter()
                .filter_map(|(old, t)| {
                    let new = *mapping.get(old)?;
                    Some((new, t.remap(|id| mapping.get(&id).copied())))
                })
                .collect(),
        };

        Self::merge_loop_headers(&mut canonical.blocks);
        canonical
    }

    /// Renumber an existing canonical graph (ids become `1..=N` again)
    pub fn renumber_canonical(cfg: &CanonicalCfg) -> CanonicalCfg {
        let blocks = cfg
            .blocks
            .iter()
            .map(|b| {
                (
                    b.id,
                    ProvisionalBlock {
                        range: b.range,
                        statements: b.statements.clone(),
                    },
                )
            })
            .collect();
        Self::renumber(&blocks, &cfg.transitions)
    }

    fn merge_loop_headers(blocks: &mut [CanonicalBlock]) {
        for k in 0..blocks.len().saturating_sub(1) {
            let (head, tail) = blocks.split_at_mut(k + 1);
            let current = &mut head[k];
            let next = &tail[0];

            let next_is_single = next.statements.len() == 1 && next.range.start == next.range.end;
            if !next_is_single || current.statements.len() < 2 {
                continue;
            }

            let (Some(last), Some(first)) = (current.statements.last(), next.statements.first()) else {
                continue;
            };
            if last != first || current.range.end != next.range.start {
                continue;
            }
            if !(last.contains(ITERATOR_MARKER) && first.contains(ITERATOR_MARKER)) {
                continue;
            }

            debug!("Merging duplicated loop header of block {} into block {}", current.id, next.id);
            current.statements.pop();
            current.range.end -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::flow_graph::domain::BlockTarget;
    use crate::shared::models::LineRange;

    fn provisional(start: u32, end: u32, statements: &[&str]) -> ProvisionalBlock {
        ProvisionalBlock {
            range: LineRange::new(start, end),
            statements: statements.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_ids_become_contiguous() {
        let blocks = BTreeMap::from([
            (7, provisional(7, 7, &["c"])),
            (1, provisional(1, 2, &["a", "b"])),
            (4, provisional(4, 4, &["d"])),
        ]);
        let transitions = BTreeMap::from([
            (1, Transition::conditional(Some(BlockTarget::Block(4)), Some(BlockTarget::End))),
            (4, Transition::unconditional(Some(BlockTarget::Block(7)))),
            (7, Transition::unconditional(Some(BlockTarget::Block(99)))),
        ]);

        let cfg = BlockRenumberer::renumber(&blocks, &transitions);

        assert_eq!(cfg.blocks.iter().map(|b| b.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(cfg.blocks[1].range, LineRange::new(4, 4));
        assert_eq!(
            cfg.transitions[&1],
            Transition::conditional(Some(BlockTarget::Block(2)), Some(BlockTarget::End))
        );
        assert_eq!(cfg.transitions[&2].unconditional, Some(BlockTarget::Block(3)));
        assert_eq!(cfg.transitions[&3].unconditional, None);
        assert!(cfg.is_well_formed());
    }

    #[test]
    fn test_loop_header_merge() {
        let header = "iterator -> x, Iterate Over -> xs";
        let blocks = BTreeMap::from([
            (1, provisional(1, 2, &["total = 0", header])),
            (2, provisional(2, 2, &[header])),
            (3, provisional(3, 3, &["total += x"])),
        ]);

        let cfg = BlockRenumberer::renumber(&blocks, &BTreeMap::new());

        assert_eq!(cfg.blocks[0].statements, vec!["total = 0"]);
        assert_eq!(cfg.blocks[0].range, LineRange::new(1, 1));
        assert_eq!(cfg.blocks[1].statements, vec![header]);
        assert!(cfg.blocks.iter().all(|b| b.is_consistent()));
    }

    #[test]
    fn test_merge_requires_iterator_statement() {
        let blocks = BTreeMap::from([
            (1, provisional(1, 2, &["x = 0", "y = 1"])),
            (2, provisional(2, 2, &["y = 1"])),
        ]);
        let cfg = BlockRenumberer::renumber(&blocks, &BTreeMap::new());
        assert_eq!(cfg.blocks[0].statements.len(), 2);
    }

    #[test]
    fn test_merge_never_empties_a_block() {
        let header = "iterator -> x, Iterate Over -> xs";
        let blocks = BTreeMap::from([
            (2, provisional(2, 2, &[header])),
            (3, provisional(2, 2, &[header])),
        ]);
        let cfg = BlockRenumberer::renumber(&blocks, &BTreeMap::new());
        assert_eq!(cfg.blocks[0].statements, vec![header]);
    }

    #[test]
    fn test_renumber_is_idempotent() {
        let blocks = BTreeMap::from([
            (3, provisional(3, 4, &["a", "b"])),
            (6, provisional(6, 6, &["c"])),
        ]);
        let transitions = BTreeMap::from([(3, Transition::unconditional(Some(BlockTarget::Block(6))))]);

        let once = BlockRenumberer::renumber(&blocks, &transitions);
        let twice = BlockRenumberer::renumber_canonical(&once);
        assert_eq!(once, twice);
    }
}
