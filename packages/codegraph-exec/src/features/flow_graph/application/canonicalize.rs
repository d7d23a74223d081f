use crate::config::CfgConfig;
use crate::errors::Result;
use crate::features::flow_graph::domain::{CanonicalCfg, RawCfg};
use crate::features::flow_graph::infrastructure::{
    BlockBuilder, BlockConnector, BlockRenumberer, CfgSerializer,
};
use tracing::debug;

/// Canonical graph together with its text rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCfg {
    pub cfg: CanonicalCfg,
    pub text: String,
}

/// Raw CFG + source → canonical block graph
pub struct CanonicalizeCfgUseCase<'a> {
    config: &'a CfgConfig,
}

impl<'a> CanonicalizeCfgUseCase<'a> {
    pub fn new(config: &'a CfgConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self, raw: &RawCfg, source: &str) -> Result<CanonicalCfg> {
        let collected = BlockBuilder::new(self.config).build(raw, source)?;
        let transitions = BlockConnector::new(self.config).connect(raw, &collected)?;
        let cfg = BlockRenumberer::renumber(&collected.blocks, &transitions);
        debug!("Canonicalized CFG into {} blocks", cfg.len());
        Ok(cfg)
    }

    /// Canonicalize and render; an inconsistent block is a `StructuralMismatch`
    pub fn execute_rendered(&self, raw: &RawCfg, source: &str) -> Result<RenderedCfg> {
        let cfg = self.execute(raw, source)?;
        let text = CfgSerializer::try_serialize(&cfg)?;
        Ok(RenderedCfg { cfg, text })
    }
}
