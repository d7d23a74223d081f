//! Source line ranges
//!
//! A block covers the inclusive range `[start, end]` of zero-indexed wrapper
//! lines, which coincide with the submission's 1-based line numbers.

use serde::{Deserialize, Serialize};

/// Inclusive line range, serialized as `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Range spanning the smallest and largest of `lines`; `None` when empty
    pub fn spanning(lines: &[u32]) -> Option<Self> {
        let start = *lines.iter().min()?;
        let end = *lines.iter().max()?;
        Some(Self::new(start, end))
    }

    pub fn contains_line(&self, line: u32) -> bool {
        self.start <= line && line <= self.end
    }

    /// Number of lines covered; 0 for an inverted range
    pub fn line_count(&self) -> usize {
        if self.end < self.start {
            0
        } else {
            (self.end - self.start) as usize + 1
        }
    }

    pub fn overlaps(&self, other: &LineRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    pub fn lines(&self) -> impl Iterator<Item = u32> {
        self.start..=self.end
    }
}

impl From<[u32; 2]> for LineRange {
    fn from(pair: [u32; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

impl From<LineRange> for [u32; 2] {
    fn from(range: LineRange) -> Self {
        [range.start, range.end]
    }
}
