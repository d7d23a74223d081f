//! Per-submission processing
//!
//! Source → raw CFG (collaborator) → canonical CFG + text → raw log
//! (collaborator) → parsed trace → aligned ground truth. Any failure discards
//! the whole submission.

use crate::config::ExecConfig;
use crate::errors::{ExecError, Result};
use crate::features::flow_graph::application::CanonicalizeCfgUseCase;
use crate::features::flow_graph::ports::CfgProvider;
use crate::features::trace::infrastructure::{TraceAligner, TraceLogParser};
use crate::features::trace::ports::TraceProvider;
use crate::pipeline::corpus::{CorpusEntry, Submission};
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

const RUNNING: u8 = 0;
const FINISHED: u8 = 1;
const ABANDONED: u8 = 2;

/// Wall-clock budget for collaborator calls
///
/// A worker that overruns cannot be killed from here: it keeps running
/// detached and its result is dropped. Such workers are counted until they
/// finish, and no new call starts while `max_overrunning` of them are alive.
/// Providers that spawn subprocesses must kill them on their own deadline.
#[derive(Debug, Clone)]
pub(crate) struct CallBudget {
    seconds: u64,
    max_overrunning: usize,
    overrunning: Arc<AtomicUsize>,
}

/// Marks a worker finished, releasing its slot if it was abandoned
struct FinishGuard {
    status: Arc<AtomicU8>,
    overrunning: Arc<AtomicUsize>,
}

impl Drop for FinishGuard {
    fn drop(&mut self) {
        if self.status.swap(FINISHED, Ordering::SeqCst) == ABANDONED {
            self.overrunning.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

impl CallBudget {
    pub(crate) fn new(seconds: u64, max_overrunning: usize) -> Self {
        Self {
            seconds,
            max_overrunning,
            overrunning: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Timed-out workers that are still running
    pub(crate) fn overrunning(&self) -> usize {
        self.overrunning.load(Ordering::SeqCst)
    }

    /// Run `job` on a worker thread, giving up after the budget
    pub(crate) fn call<T, F>(&self, stage: &str, job: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        let alive = self.overrunning();
        if alive >= self.max_overrunning {
            warn!("{}: {} timed-out workers still running, refusing new call", stage, alive);
            return Err(ExecError::external(
                stage,
                format!("{} timed-out workers still running", alive),
            ));
        }

        let status = Arc::new(AtomicU8::new(RUNNING));
        let guard = FinishGuard {
            status: Arc::clone(&status),
            overrunning: Arc::clone(&self.overrunning),
        };
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name(format!("exec-{stage}"))
            .spawn(move || {
                let _guard = guard;
                // Receiver may be gone after a timeout
                let _ = tx.send(job());
            })?;

        match rx.recv_timeout(Duration::from_secs(self.seconds)) {
            Ok(result) => result,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                self.overrunning.fetch_add(1, Ordering::SeqCst);
                if status
                    .compare_exchange(RUNNING, ABANDONED, Ordering::SeqCst, Ordering::SeqCst)
                    .is_err()
                {
                    // Finished right after the deadline
                    self.overrunning.fetch_sub(1, Ordering::SeqCst);
                }
                warn!("{} exceeded {}s budget", stage, self.seconds);
                Err(ExecError::Timeout {
                    stage: stage.to_string(),
                    seconds: self.seconds,
                })
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                Err(ExecError::external(stage, "worker terminated without a result"))
            }
        }
    }
}

pub struct SubmissionProcessor {
    config: Arc<ExecConfig>,
    cfg_provider: Arc<dyn CfgProvider>,
    trace_provider: Arc<dyn TraceProvider>,
    budget: CallBudget,
}

impl SubmissionProcessor {
    pub fn new(
        config: Arc<ExecConfig>,
        cfg_provider: Arc<dyn CfgProvider>,
        trace_provider: Arc<dyn TraceProvider>,
    ) -> Self {
        let budget = CallBudget::new(config.batch.timeout_seconds, config.batch.max_overrunning_workers);
        Self {
            config,
            cfg_provider,
            trace_provider,
            budget,
        }
    }

    pub fn config(&self) -> &ExecConfig {
        &self.config
    }

    pub fn process(&self, submission: &Submission) -> Result<CorpusEntry> {
        let raw = {
            let provider = Arc::clone(&self.cfg_provider);
            let code = submission.code.clone();
            self.budget.call("cfg", move || provider.build_cfg(&code))?
        };

        let rendered = CanonicalizeCfgUseCase::new(&self.config.cfg)
            .execute_rendered(&raw, &submission.code)?;

        let log = {
            let provider = Arc::clone(&self.trace_provider);
            let code = submission.code.clone();
            self.budget.call("trace", move || provider.run(&code))?
        };

        let trace = TraceLogParser::new(&self.config.trace)?.parse(&log)?;
        let aligned = TraceAligner::align(&rendered.cfg, &trace);

        debug!(
            "{}/{}: {} blocks, {} trace steps",
            submission.problem_id,
            submission.submission_id,
            rendered.cfg.len(),
            aligned.entries.len()
        );

        Ok(CorpusEntry {
            code: submission.code.clone(),
            cfg: rendered.cfg,
            cfg_text: rendered.text,
            execution_order: trace.execution_order,
            ground_truth: aligned.entries,
            exception: trace.exception,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_call_returns_result() {
        let value = CallBudget::new(5, 4).call("unit", || Ok(42)).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_call_propagates_error() {
        let err = CallBudget::new(5, 4)
            .call::<u32, _>("unit", || Err(ExecError::parse("bad")))
            .unwrap_err();
        assert!(matches!(err, ExecError::LogParse(_)));
    }

    #[test]
    fn test_call_expires() {
        let err = CallBudget::new(1, 4)
            .call("slow", || {
                thread::sleep(Duration::from_secs(3));
                Ok(())
            })
            .unwrap_err();
        assert!(matches!(err, ExecError::Timeout { seconds: 1, .. }));
    }

    #[test]
    fn test_panicking_worker_is_external_failure() {
        let err = CallBudget::new(5, 4)
            .call::<(), _>("crash", || panic!("boom"))
            .unwrap_err();
        assert!(matches!(err, ExecError::External { .. }));
    }

    #[test]
    fn test_overrunning_workers_are_bounded() {
        let budget = CallBudget::new(1, 1);
        let (release, hold) = mpsc::channel::<()>();

        let err = budget
            .call("stuck", move || {
                let _ = hold.recv();
                Ok(())
            })
            .unwrap_err();
        assert!(matches!(err, ExecError::Timeout { .. }));
        assert_eq!(budget.overrunning(), 1);

        let refused = budget.call("next", || Ok(1)).unwrap_err();
        assert!(matches!(refused, ExecError::External { .. }));

        drop(release);
        let deadline = Instant::now() + Duration::from_secs(5);
        while budget.overrunning() > 0 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(budget.overrunning(), 0);
        assert_eq!(budget.call("next", || Ok(1)).unwrap(), 1);
    }
}
