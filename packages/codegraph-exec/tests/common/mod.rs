//! Common test utilities for codegraph-exec
//!
//! Fixture programs with their raw CFGs, instrumentation logs and predictor
//! outputs, plus scripted collaborators for the batch pipeline.

#![allow(dead_code)]

mod fixtures;
mod providers;

pub use fixtures::*;
pub use providers::*;
