//! Scripted collaborators
//!
//! Both providers dispatch on the submission text: a `# crash` comment makes
//! them fail, a `# slow` comment makes them overrun any one-second budget.

use codegraph_exec::errors::{ExecError, Result};
use codegraph_exec::features::flow_graph::domain::RawCfg;
use codegraph_exec::features::flow_graph::ports::CfgProvider;
use codegraph_exec::features::trace::ports::TraceProvider;
use std::thread;
use std::time::Duration;

use super::fixtures::*;

fn scripted(source: &str, stage: &str) -> Result<()> {
    if source.contains(&format!("# {stage}-crash")) {
        return Err(ExecError::external(stage, "collaborator crashed"));
    }
    if source.contains(&format!("# {stage}-slow")) {
        thread::sleep(Duration::from_secs(3));
    }
    Ok(())
}

pub struct FixtureCfgProvider;

impl CfgProvider for FixtureCfgProvider {
    fn build_cfg(&self, source: &str) -> Result<RawCfg> {
        scripted(source, "cfg")?;
        if source.starts_with(RAISING_PROGRAM) {
            return Ok(RawCfg::from_json(raising_program_raw_cfg_json())?);
        }
        Ok(if_program_raw_cfg())
    }
}

pub struct FixtureTraceProvider;

impl TraceProvider for FixtureTraceProvider {
    fn run(&self, source: &str) -> Result<String> {
        scripted(source, "trace")?;
        if source.starts_with(RAISING_PROGRAM) {
            return Ok(raising_program_log().to_string());
        }
        if source.contains("# garbled") {
            return Ok("no markers at all".to_string());
        }
        Ok(if_program_log().to_string())
    }
}
