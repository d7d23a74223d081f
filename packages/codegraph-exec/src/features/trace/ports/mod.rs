use crate::errors::Result;

/// External runner that executes a submission under instrumentation
///
/// Returns the raw log text. Calls run under the batch timeout, but an
/// overrunning call is only abandoned, not stopped; implementations must
/// kill the instrumented process on their own deadline.
pub trait TraceProvider: Send + Sync {
    fn run(&self, source: &str) -> Result<String>;
}
