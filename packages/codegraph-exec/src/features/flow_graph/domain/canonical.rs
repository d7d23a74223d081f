//! Canonical block graph
//!
//! Blocks are numbered `1..=N` in ascending start-line order; ranges never
//! overlap. The transition table maps each block id to its successors.

use crate::shared::models::LineRange;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Rendered form of [`BlockTarget::End`]
pub const END_SENTINEL: &str = "<END>";

/// Successor of a block: another block, or control leaving the function
///
/// Serialized as a bare number or the string `"<END>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TargetRepr", into = "TargetRepr")]
pub enum BlockTarget {
    Block(u32),
    End,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum TargetRepr {
    Id(u32),
    Sentinel(String),
}

impl TryFrom<TargetRepr> for BlockTarget {
    type Error = String;

    fn try_from(repr: TargetRepr) -> Result<Self, Self::Error> {
        match repr {
            TargetRepr::Id(id) => Ok(BlockTarget::Block(id)),
            TargetRepr::Sentinel(s) if s == END_SENTINEL => Ok(BlockTarget::End),
            TargetRepr::Sentinel(s) => Err(format!("unknown block target '{}'", s)),
        }
    }
}

impl From<BlockTarget> for TargetRepr {
    fn from(target: BlockTarget) -> Self {
        match target {
            BlockTarget::Block(id) => TargetRepr::Id(id),
            BlockTarget::End => TargetRepr::Sentinel(END_SENTINEL.to_string()),
        }
    }
}

impl fmt::Display for BlockTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockTarget::Block(id) => write!(f, "{}", id),
            BlockTarget::End => f.write_str(END_SENTINEL),
        }
    }
}

/// Outgoing edges of one block
///
/// `None` means "no such edge", which is distinct from [`BlockTarget::End`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    #[serde(default)]
    pub on_true: Option<BlockTarget>,
    #[serde(default)]
    pub on_false: Option<BlockTarget>,
    #[serde(default)]
    pub unconditional: Option<BlockTarget>,
}

impl Transition {
    pub fn conditional(on_true: Option<BlockTarget>, on_false: Option<BlockTarget>) -> Self {
        Self {
            on_true,
            on_false,
            unconditional: None,
        }
    }

    pub fn unconditional(target: Option<BlockTarget>) -> Self {
        Self {
            unconditional: target,
            ..Self::default()
        }
    }

    pub fn is_conditional(&self) -> bool {
        self.on_true.is_some() || self.on_false.is_some()
    }

    /// Rewrite block ids through `f`; `End` is kept, ids `f` rejects become `None`
    pub fn remap(&self, f: impl Fn(u32) -> Option<u32>) -> Self {
        let map = |t: Option<BlockTarget>| match t {
            Some(BlockTarget::Block(id)) => f(id).map(BlockTarget::Block),
            other => other,
        };
        Self {
            on_true: map(self.on_true),
            on_false: map(self.on_false),
            unconditional: map(self.unconditional),
        }
    }
}

/// Block as collected from the raw CFG, keyed by its first line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionalBlock {
    pub range: LineRange,
    pub statements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalBlock {
    pub id: u32,
    pub range: LineRange,
    pub statements: Vec<String>,
}

impl CanonicalBlock {
    pub fn new(id: u32, range: LineRange, statements: Vec<String>) -> Self {
        Self {
            id,
            range,
            statements,
        }
    }

    /// Statement count agrees with the number of lines the range spans
    pub fn is_consistent(&self) -> bool {
        self.statements.len() == self.range.line_count()
    }
}

/// Canonical block set plus transition table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalCfg {
    pub blocks: Vec<CanonicalBlock>,
    pub transitions: BTreeMap<u32, Transition>,
}

impl CanonicalCfg {
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn block(&self, id: u32) -> Option<&CanonicalBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// First block whose range contains `line`
    pub fn block_containing(&self, line: u32) -> Option<&CanonicalBlock> {
        self.blocks.iter().find(|b| b.range.contains_line(line))
    }

    pub fn transition(&self, id: u32) -> Option<&Transition> {
        self.transitions.get(&id)
    }

    /// Ids are `1..=N` in order, ranges ascend and never overlap
    pub fn is_well_formed(&self) -> bool {
        let contiguous = self
            .blocks
            .iter()
            .enumerate()
            .all(|(i, b)| b.id as usize == i + 1);
        let ordered = self.blocks.windows(2).all(|pair| {
            pair[0].range.start < pair[1].range.start && !pair[0].range.overlaps(&pair[1].range)
        });
        contiguous && ordered
    }
}
