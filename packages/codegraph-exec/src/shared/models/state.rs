//! Variable state snapshots

use std::collections::BTreeMap;

/// Variable name → raw value text as printed by the instrumentation
///
/// Ordered so persisted documents are byte-stable.
pub type StateMap = BTreeMap<String, String>;
