pub mod canonical;
mod raw_cfg;

pub use canonical::{
    BlockTarget, CanonicalBlock, CanonicalCfg, ProvisionalBlock, Transition, END_SENTINEL,
};
pub use raw_cfg::{RawBlock, RawBranches, RawCfg, RawControlNode, StatementKind};
