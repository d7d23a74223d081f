//! Batch orchestration: per-submission isolation and discard accounting

mod common;

use codegraph_exec::config::ExecConfig;
use codegraph_exec::errors::DiscardReason;
use codegraph_exec::pipeline::{BatchProcessor, SubmissionProcessor};
use common::*;
use std::sync::Arc;

fn batch(config: ExecConfig) -> BatchProcessor {
    BatchProcessor::new(SubmissionProcessor::new(
        Arc::new(config),
        Arc::new(FixtureCfgProvider),
        Arc::new(FixtureTraceProvider),
    ))
}

fn small_pool() -> ExecConfig {
    let mut config = ExecConfig::default();
    config.batch.num_threads = Some(2);
    config.batch.timeout_seconds = 1;
    config
}

#[test]
fn test_one_failing_collaborator_discards_one_submission() {
    let submissions = vec![
        submission("p1", "ok-1", IF_PROGRAM),
        submission("p1", "crash", &format!("{IF_PROGRAM}# trace-crash\n")),
        submission("p2", "ok-2", RAISING_PROGRAM),
    ];

    let (corpus, report) = batch(small_pool()).run(&submissions).unwrap();

    assert_eq!(report.processed, 3);
    assert_eq!(report.succeeded, 2);
    assert_eq!(report.discarded(), 1);
    assert_eq!(report.discards_for(DiscardReason::ExternalFailure), 1);

    assert_eq!(corpus.len(), 2);
    assert!(corpus.get("p1", "ok-1").is_some());
    assert!(corpus.get("p1", "crash").is_none());
    assert!(corpus.get("p2", "ok-2").unwrap().exception.is_some());
}

#[test]
fn test_slow_collaborator_is_a_timeout() {
    let submissions = vec![
        submission("p1", "slow", &format!("{IF_PROGRAM}# cfg-slow\n")),
        submission("p1", "ok", IF_PROGRAM),
    ];

    let (corpus, report) = batch(small_pool()).run(&submissions).unwrap();

    assert_eq!(report.discards_for(DiscardReason::Timeout), 1);
    assert_eq!(corpus.len(), 1);
}

#[test]
fn test_unparseable_log_is_a_parse_failure() {
    let submissions = vec![submission("p1", "garbled", &format!("{IF_PROGRAM}# garbled\n"))];

    let (corpus, report) = batch(small_pool()).run(&submissions).unwrap();

    assert!(corpus.is_empty());
    assert_eq!(report.discards_for(DiscardReason::ParseFailure), 1);
}

#[test]
fn test_unclassifiable_source_is_a_parse_failure() {
    // Syntax error in the source the CFG points into
    let submissions = vec![submission("p1", "broken", "x = 1\nif x >:\n    y = 2\nprint(y)\n")];

    let (_, report) = batch(small_pool()).run(&submissions).unwrap();
    assert_eq!(report.discards_for(DiscardReason::ParseFailure), 1);
}

#[test]
fn test_empty_batch() {
    let (corpus, report) = batch(small_pool()).run(&[]).unwrap();
    assert!(corpus.is_empty());
    assert_eq!(report.processed, 0);
}
