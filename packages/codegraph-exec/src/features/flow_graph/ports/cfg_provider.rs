use crate::errors::Result;
use crate::features::flow_graph::domain::RawCfg;

/// External builder of the raw CFG for one submission
///
/// Calls run under the batch timeout, but an overrunning call is only
/// abandoned, not stopped. Implementations backed by a subprocess must kill
/// it on their own deadline.
pub trait CfgProvider: Send + Sync {
    fn build_cfg(&self, source: &str) -> Result<RawCfg>;
}
