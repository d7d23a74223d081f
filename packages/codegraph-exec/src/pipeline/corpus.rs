//! Persisted corpus document
//!
//! `problem_id → submission_id → entry`, saved as one JSON document.

use crate::errors::Result;
use crate::features::flow_graph::domain::CanonicalCfg;
use crate::features::trace::domain::{BlockExecutionEntry, ExceptionInfo};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// One submission handed to the batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub problem_id: String,
    pub submission_id: String,
    pub code: String,
}

impl Submission {
    pub fn new(
        problem_id: impl Into<String>,
        submission_id: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            problem_id: problem_id.into(),
            submission_id: submission_id.into(),
            code: code.into(),
        }
    }
}

/// Everything kept for a successfully processed submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusEntry {
    pub code: String,
    pub cfg: CanonicalCfg,
    pub cfg_text: String,
    /// Line-level execution order from the log
    pub execution_order: Vec<u32>,
    pub ground_truth: Vec<BlockExecutionEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception: Option<ExceptionInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Corpus {
    problems: BTreeMap<String, BTreeMap<String, CorpusEntry>>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, problem_id: impl Into<String>, submission_id: impl Into<String>, entry: CorpusEntry) {
        self.problems
            .entry(problem_id.into())
            .or_default()
            .insert(submission_id.into(), entry);
    }

    pub fn get(&self, problem_id: &str, submission_id: &str) -> Option<&CorpusEntry> {
        self.problems.get(problem_id)?.get(submission_id)
    }

    /// Number of submissions across all problems
    pub fn len(&self) -> usize {
        self.problems.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn problem_ids(&self) -> impl Iterator<Item = &str> {
        self.problems.keys().map(String::as_str)
    }

    /// `(problem_id, submission_id, entry)` in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &CorpusEntry)> {
        self.problems.iter().flat_map(|(problem, submissions)| {
            submissions
                .iter()
                .map(move |(submission, entry)| (problem.as_str(), submission.as_str(), entry))
        })
    }

    pub fn merge(&mut self, other: Corpus) {
        for (problem, submissions) in other.problems {
            self.problems.entry(problem).or_default().extend(submissions);
        }
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
