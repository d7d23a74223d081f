//! Instrumentation log parsing
//!
//! The runner prints one line per traced event, e.g.
//!
//! ```text
//! example.py:2  line  total = 0
//! example.py:3  line  for x in xs:  [total => 0]
//! example.py:4  exception  total += x  [x => 'a']
//! ...          [xs => ['a']]
//! ! test_function: (<class 'TypeError'>, TypeError("unsupported operand"))
//! ```
//!
//! Bindings printed on a line describe the state after the previously
//! marked line ran, so every event is attributed one marker back.

use crate::config::TraceConfig;
use crate::errors::{ExecError, Result};
use crate::features::trace::domain::{ExceptionInfo, ExecutionTrace, TraceEvent};
use crate::shared::models::StateMap;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// `[name => value]` with one level of nested brackets inside
static BINDING_GROUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([^\[\]]*(?:\[[^\[\]]*\])*[^\[\]]*)\]").expect("binding group pattern")
});

/// `(<class 'X'>), (X(...))` inside the trailer repr
static EXCEPTION_PARTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(<class '.*?'>), (\w+\((?:[^()]|\([^()]*\))*?\))").expect("exception parts pattern")
});

pub struct TraceLogParser<'a> {
    config: &'a TraceConfig,
    marker: Regex,
    trailer: Regex,
}

impl<'a> TraceLogParser<'a> {
    pub fn new(config: &'a TraceConfig) -> Result<Self> {
        let marker = Regex::new(&format!(r"{}:(\d+)", regex::escape(&config.module_marker)))
            .map_err(|e| ExecError::parse(e.to_string()))?;
        let trailer = Regex::new(&format!(r"!\s+{}:\s+\((.*)\)", regex::escape(&config.wrapper_function)))
            .map_err(|e| ExecError::parse(e.to_string()))?;
        Ok(Self {
            config,
            marker,
            trailer,
        })
    }

    /// Parse a whole log; missing structure discards the run
    pub fn parse(&self, log: &str) -> Result<ExecutionTrace> {
        let lines: Vec<&str> = log.trim().lines().collect();

        let execution_order = self.execution_order(&lines);
        if execution_order.is_empty() {
            return Err(ExecError::parse("log has no executed lines"));
        }

        let (mut events, raised_at) = self.events_until_exception(&lines);
        let exception = match raised_at {
            Some(index) => {
                let (state, info) = self.exception_at(&lines, index)?;
                events.extend(state);
                Some(info)
            }
            None => None,
        };

        // A run that crashes on its first line only has post-mortem bindings
        if events.is_empty() {
            return Err(ExecError::parse("log has no variable bindings"));
        }

        debug!(
            "Parsed log: {} executed lines, {} events, exception={}",
            execution_order.len(),
            events.len(),
            exception.is_some()
        );
        Ok(ExecutionTrace {
            execution_order,
            events,
            exception,
        })
    }

    /// Marked lines with consecutive repeats collapsed, minus the wrapper call
    pub fn execution_order(&self, lines: &[&str]) -> Vec<u32> {
        let mut order: Vec<u32> = Vec::new();
        for line in lines {
            for caps in self.marker.captures_iter(line) {
                let Some(number) = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) else {
                    continue;
                };
                let number = number.saturating_sub(self.config.line_offset);
                if order.last() != Some(&number) {
                    order.push(number);
                }
            }
        }
        order.into_iter().skip(1).collect()
    }

    fn marked_line(&self, line: &str) -> Option<u32> {
        self.marker
            .captures(line)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .map(|n| n.saturating_sub(self.config.line_offset))
    }

    /// Events before the exception line, plus that line's index if one exists
    fn events_until_exception(&self, lines: &[&str]) -> (Vec<TraceEvent>, Option<usize>) {
        let mut raw: Vec<(Option<u32>, Vec<(String, String)>)> = Vec::new();
        let mut previous: Option<u32> = None;
        let mut current: Option<u32> = None;
        let mut raised_at = None;

        for (index, line) in lines.iter().enumerate() {
            if line.contains(&self.config.exception_token) {
                raised_at = Some(index);
                break;
            }

            if let Some(number) = self.marked_line(line) {
                previous = current;
                current = Some(number);
            }

            let bindings = bindings_in(line, "=>");
            if bindings.is_empty() {
                continue;
            }

            // Consecutive observations of the same line form one event
            match raw.last_mut() {
                Some((line_number, pairs)) if *line_number == previous => pairs.extend(bindings),
                _ => raw.push((previous, bindings)),
            }
        }

        (finish_events(raw), raised_at)
    }

    /// Post-mortem state and exception details starting at `index`
    fn exception_at(&self, lines: &[&str], index: usize) -> Result<(Option<TraceEvent>, ExceptionInfo)> {
        let line_number = self
            .marked_line(lines[index])
            .ok_or_else(|| ExecError::parse("exception line has no line marker"))?;

        let mut pairs = bindings_in(lines[index], "=>");
        let mut next = index + 1;
        while next < lines.len() && lines[next].trim().starts_with(&self.config.continuation_prefix) {
            pairs.extend(bindings_in(lines[next], " => "));
            next += 1;
        }

        let repr = lines
            .get(next)
            .and_then(|line| self.trailer.captures(line))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim_matches(|c| c == '"' || c == '\''))
            .ok_or_else(|| ExecError::parse("exception signaled without a trailer"))?;

        let caps = EXCEPTION_PARTS
            .captures(repr)
            .ok_or_else(|| ExecError::parse(format!("unrecognized exception repr: {}", repr)))?;

        let info = ExceptionInfo {
            class: caps[1].to_string(),
            message: caps[2].to_string(),
            line: line_number,
        };
        let state = finish_events(vec![(Some(line_number), pairs)]).into_iter().next();
        Ok((state, info))
    }
}

/// `(name, value)` pairs from every bracket group splitting into exactly two parts
fn bindings_in(line: &str, separator: &str) -> Vec<(String, String)> {
    BINDING_GROUP
        .captures_iter(line)
        .filter_map(|caps| {
            let group = caps.get(1)?.as_str();
            let parts: Vec<&str> = group.split(separator).collect();
            match parts.as_slice() {
                [name, value] => Some((name.trim().to_string(), value.trim().to_string())),
                _ => None,
            }
        })
        .collect()
}

/// Drop unattributed or header events; repeated names keep the last value
fn finish_events(raw: Vec<(Option<u32>, Vec<(String, String)>)>) -> Vec<TraceEvent> {
    raw.into_iter()
        .filter_map(|(line, pairs)| {
            let line = line.filter(|&l| l > 0)?;
            let bindings: StateMap = pairs.into_iter().collect();
            (!bindings.is_empty()).then(|| TraceEvent::new(line, bindings))
        })
        .collect()
}
