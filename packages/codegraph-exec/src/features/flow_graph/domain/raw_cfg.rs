//! Raw control-flow graph handed over by the external CFG builder
//!
//! Blocks reference each other by index into [`RawCfg::blocks`]. Line numbers
//! are positions in the wrapper file the builder analyzed, not in the
//! submission itself.

use serde::{Deserialize, Serialize};

/// Syntactic kind of the statement a control node was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    For,
    If,
    #[default]
    Other,
}

/// One line-level node inside a raw block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawControlNode {
    pub line_number: u32,
    #[serde(default)]
    pub statement_kind: StatementKind,
    #[serde(default)]
    pub raw_text: String,
}

impl RawControlNode {
    pub fn new(line_number: u32, statement_kind: StatementKind, raw_text: impl Into<String>) -> Self {
        Self {
            line_number,
            statement_kind,
            raw_text: raw_text.into(),
        }
    }
}

/// Conditional successors (indices into `RawCfg::blocks`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBranches {
    pub on_true: usize,
    pub on_false: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub nodes: Vec<RawControlNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branches: Option<RawBranches>,
    #[serde(default)]
    pub next: Vec<usize>,
}

impl RawBlock {
    pub fn labelled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn with_nodes(nodes: Vec<RawControlNode>) -> Self {
        Self {
            nodes,
            ..Self::default()
        }
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.label.as_deref() == Some(label)
    }

    /// Node lines shifted back by the wrapper header
    pub fn scope(&self, line_offset: u32) -> Vec<u32> {
        self.nodes
            .iter()
            .map(|n| n.line_number.saturating_sub(line_offset))
            .collect()
    }
}

/// Raw CFG document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCfg {
    pub blocks: Vec<RawBlock>,
}

impl RawCfg {
    pub fn new(blocks: Vec<RawBlock>) -> Self {
        Self { blocks }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn block(&self, index: usize) -> Option<&RawBlock> {
        self.blocks.get(index)
    }

    /// Index of the first block carrying `label`
    pub fn position_of(&self, label: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.has_label(label))
    }
}
