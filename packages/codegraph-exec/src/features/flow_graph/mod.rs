//! Flow graph canonicalization
//!
//! Raw line-level CFG → contiguously numbered blocks with a transition table
//! and a fixed text rendering.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{CanonicalizeCfgUseCase, RenderedCfg};
pub use domain::{BlockTarget, CanonicalBlock, CanonicalCfg, RawCfg, Transition};
pub use infrastructure::CfgSerializer;
pub use ports::CfgProvider;
