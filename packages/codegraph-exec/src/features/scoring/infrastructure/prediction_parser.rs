//! Predictor response parsing
//!
//! The predictor walks the CFG text and answers in free form:
//!
//! ```text
//! Block 1:
//! Observation: x is assigned
//! Symbol Table: {'x': (2, int)}
//! Block 2:
//! Symbol Table: {'x': (3, int), 'y': ('a', str)}
//! <END>
//! Is Error: true
//! Error Type: <class 'TypeError'>
//! Block: 2
//! ```

use crate::errors::{ExecError, Result};
use crate::features::scoring::domain::{
    split_dict_entries, PredictedError, PredictedExecution, PredictedState,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use tracing::debug;

/// At least one of these must appear for the response to count as a walk
const REQUIRED_KEYWORDS: &[&str] = &["Observation", "evaluate", "Error Type", "<END>"];

static BLOCK_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Block\s*:?\s*(\d+)\s*:?[ ]?$").expect("block header pattern"));

static ERROR_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Block:\s*(\d+)").expect("error block pattern"));

static CLASS_REPR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<class '(\w+)'>").expect("class repr pattern"));

static ERROR_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Error Type:\s*(\w+)").expect("error type pattern"));

static SYMBOL_TABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)symbol table:?.*?\{.*\}").expect("symbol table pattern"));

pub struct PredictionParser;

impl PredictionParser {
    pub fn parse(output: &str) -> Result<PredictedExecution> {
        if !REQUIRED_KEYWORDS.iter().any(|k| output.contains(k)) {
            return Err(ExecError::parse(format!(
                "predictor output missing all of: {}",
                REQUIRED_KEYWORDS.join(", ")
            )));
        }

        let lines: Vec<&str> = output.split('\n').collect();
        let mut sections: Vec<(u32, Vec<&str>)> = Vec::new();
        let mut error = PredictedError::default();

        for (index, line) in lines.iter().enumerate() {
            if line.contains("Is Error") && line.to_lowercase().contains("true") {
                error.is_error = true;
            }

            if line.contains("Error Type") && error.is_error {
                if line.contains("None") {
                    error.is_error = false;
                    break;
                }
                let label = CLASS_REPR
                    .captures(line)
                    .or_else(|| ERROR_TYPE.captures(line))
                    .and_then(|caps| caps.get(1))
                    .map(|m| m.as_str().trim().to_string());
                if let Some(label) = label {
                    error.error_type = Some(label);
                    error.error_block = first_block_reference(&lines[index..]);
                    break;
                }
            }

            if let Some(id) = BLOCK_HEADER
                .captures(line)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse::<u32>().ok())
            {
                sections.push((id, Vec::new()));
            }
            if let Some((_, content)) = sections.last_mut() {
                content.push(line);
            }
        }

        let states: Vec<PredictedState> = sections
            .iter()
            .map(|(id, content)| PredictedState {
                block_id: *id,
                symbol_table: symbol_table_in(content),
            })
            .collect();

        debug!(
            "Parsed prediction: {} blocks, error={}",
            states.len(),
            error.is_error
        );
        Ok(PredictedExecution {
            block_order: sections.iter().map(|(id, _)| *id).collect(),
            states,
            error,
        })
    }
}

fn first_block_reference(lines: &[&str]) -> Option<u32> {
    lines.iter().find_map(|line| {
        ERROR_BLOCK
            .captures(line)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    })
}

/// Last `Symbol Table: {...}` in a section, values kept as raw text
fn symbol_table_in(content: &[&str]) -> Option<BTreeMap<String, String>> {
    let mut candidate = None;
    for line in content {
        for found in SYMBOL_TABLE.find_iter(line) {
            let text = found.as_str();
            if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
                candidate = Some(&text[start..=end]);
            }
        }
    }

    match split_dict_entries(candidate?) {
        Ok(entries) => Some(
            entries
                .into_iter()
                .map(|(name, value)| (name.to_python_str(), value))
                .collect(),
        ),
        Err(e) => {
            debug!("Ignoring unparseable symbol table: {}", e);
            None
        }
    }
}
