//! Property-based tests
//!
//! Invariants that should hold for ALL generated inputs:
//! - Canonical blocks are numbered 1..=n, consistent and disjoint
//! - Renumbering a canonical graph is idempotent
//! - Aligned traces never repeat a block back to back
//! - Metrics are total: undefined inputs give None, identical walks give 1

mod common;

use codegraph_exec::config::CfgConfig;
use codegraph_exec::features::flow_graph::application::CanonicalizeCfgUseCase;
use codegraph_exec::features::flow_graph::domain::{RawBlock, RawCfg};
use codegraph_exec::features::flow_graph::infrastructure::{BlockRenumberer, CfgSerializer};
use codegraph_exec::features::scoring::infrastructure::{coverage, exact_match, prefix, transition};
use codegraph_exec::features::trace::domain::{ExecutionTrace, TraceEvent};
use codegraph_exec::features::trace::infrastructure::TraceAligner;
use codegraph_exec::shared::models::StateMap;
use common::raw_block;
use proptest::prelude::*;

/// Straight-line program split into raw blocks of the given sizes
fn straight_line(chunks: &[u32]) -> (String, RawCfg) {
    let total: u32 = chunks.iter().sum();
    let source: String = (1..=total).map(|i| format!("v{i} = {i}\n")).collect();

    let mut blocks = vec![RawBlock::labelled("<entry:testFun>")];
    let mut next_line = 2; // raw lines sit one below the wrapper header
    for (index, &size) in chunks.iter().enumerate() {
        let lines: Vec<u32> = (next_line..next_line + size).collect();
        next_line += size;
        let mut block = raw_block(&lines);
        if index + 1 < chunks.len() {
            block.next = vec![index + 2];
        }
        blocks.push(block);
    }
    (source, RawCfg::new(blocks))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_canonical_blocks_are_well_formed(chunks in prop::collection::vec(1u32..4, 1..6)) {
        let (source, raw) = straight_line(&chunks);
        let config = CfgConfig::default();
        let rendered = CanonicalizeCfgUseCase::new(&config).execute_rendered(&raw, &source).unwrap();
        let cfg = rendered.cfg;

        prop_assert_eq!(cfg.len(), chunks.len());
        prop_assert!(cfg.is_well_formed());
        for (index, block) in cfg.blocks.iter().enumerate() {
            prop_assert_eq!(block.id as usize, index + 1);
            prop_assert!(block.is_consistent());
        }
        for pair in cfg.blocks.windows(2) {
            prop_assert!(pair[0].range.end < pair[1].range.start);
        }
        prop_assert!(!rendered.text.is_empty());
        prop_assert_eq!(rendered.text.matches("<END>").count(), 1);
    }

    #[test]
    fn prop_renumber_is_idempotent(chunks in prop::collection::vec(1u32..4, 1..6)) {
        let (source, raw) = straight_line(&chunks);
        let config = CfgConfig::default();
        let cfg = CanonicalizeCfgUseCase::new(&config).execute(&raw, &source).unwrap();

        let once = BlockRenumberer::renumber_canonical(&cfg);
        prop_assert_eq!(&once, &cfg);
        prop_assert_eq!(BlockRenumberer::renumber_canonical(&once), once.clone());
        prop_assert_eq!(CfgSerializer::serialize(&once), CfgSerializer::serialize(&cfg));
    }

    #[test]
    fn prop_aligned_trace_has_no_adjacent_repeats(
        chunks in prop::collection::vec(1u32..4, 1..6),
        picks in prop::collection::vec(0u32..32, 0..40),
    ) {
        let (source, raw) = straight_line(&chunks);
        let config = CfgConfig::default();
        let cfg = CanonicalizeCfgUseCase::new(&config).execute(&raw, &source).unwrap();

        // Lines beyond the program exercise the skip path
        let total: u32 = chunks.iter().sum();
        let execution_order: Vec<u32> = picks.iter().map(|p| p % (total + 2) + 1).collect();
        let events = execution_order
            .iter()
            .map(|&line| TraceEvent::new(line, StateMap::from([("v".to_string(), line.to_string())])))
            .collect();
        let trace = ExecutionTrace { execution_order, events, exception: None };

        let aligned = TraceAligner::align(&cfg, &trace);
        prop_assert!(!aligned.has_adjacent_repeats());
        prop_assert_eq!(aligned.desynced, 0);
        for entry in &aligned.entries {
            prop_assert!(cfg.block(entry.block_id).is_some());
        }
    }

    #[test]
    fn prop_exact_match_implies_full_scores(walk in prop::collection::vec(1u32..8, 1..20)) {
        prop_assert_eq!(exact_match(&walk, &walk), 1);
        let c = coverage(&walk, &walk).unwrap();
        let p = prefix(&walk, &walk).unwrap();
        prop_assert_eq!((c.recall, c.precision), (1.0, 1.0));
        prop_assert_eq!((p.recall, p.precision), (1.0, 1.0));
        if let Some(t) = transition(&walk, &walk) {
            prop_assert_eq!((t.recall, t.precision), (1.0, 1.0));
        }
    }

    #[test]
    fn prop_metrics_are_total(
        p in prop::collection::vec(1u32..6, 0..10),
        g in prop::collection::vec(1u32..6, 0..10),
    ) {
        for metric in [coverage(&p, &g), prefix(&p, &g), transition(&p, &g)] {
            match metric {
                None => {}
                Some(rp) => {
                    prop_assert!((0.0..=1.0).contains(&rp.recall));
                    prop_assert!((0.0..=1.0).contains(&rp.precision));
                }
            }
        }
        if p.is_empty() || g.is_empty() {
            prop_assert!(coverage(&p, &g).is_none());
            prop_assert!(prefix(&p, &g).is_none());
            prop_assert!(transition(&p, &g).is_none());
        }
    }
}
