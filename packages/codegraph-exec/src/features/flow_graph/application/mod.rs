mod canonicalize;

pub use canonicalize::{CanonicalizeCfgUseCase, RenderedCfg};
