//! Execution comparison metrics
//!
//! Pure functions over predicted (`p`) and ground-truth (`g`) sequences of
//! block ids or line numbers. Undefined results are `None`, never NaN.

use crate::config::ScoringConfig;
use crate::features::scoring::domain::RecallPrecision;
use std::collections::HashSet;
use std::hash::Hash;

/// 1 iff both sequences are element-wise equal
pub fn exact_match<T: PartialEq>(p: &[T], g: &[T]) -> u8 {
    u8::from(p == g)
}

/// Distinct elements in common over distinct elements of each side
pub fn coverage<T: Eq + Hash>(p: &[T], g: &[T]) -> Option<RecallPrecision> {
    if p.is_empty() || g.is_empty() {
        return None;
    }
    let predicted: HashSet<&T> = p.iter().collect();
    let reference: HashSet<&T> = g.iter().collect();
    let matched = predicted.intersection(&reference).count();
    Some(RecallPrecision::ratio(matched, reference.len(), predicted.len()))
}

/// Longest common prefix over each length
pub fn prefix<T: PartialEq>(p: &[T], g: &[T]) -> Option<RecallPrecision> {
    if p.is_empty() || g.is_empty() {
        return None;
    }
    let common = p.iter().zip(g).take_while(|(a, b)| a == b).count();
    Some(RecallPrecision::ratio(common, g.len(), p.len()))
}

/// Overlap of consecutive-pair edge sets
///
/// Two single-element sequences have no edges and score (1, 1) when equal,
/// (0, 0) otherwise. Any other side without edges is undefined.
pub fn transition<T: Eq + Hash + Copy>(p: &[T], g: &[T]) -> Option<RecallPrecision> {
    if p.is_empty() || g.is_empty() {
        return None;
    }
    if p.len() == 1 && g.len() == 1 {
        let score = if p[0] == g[0] { 1.0 } else { 0.0 };
        return Some(RecallPrecision::new(score, score));
    }

    let edges = |seq: &[T]| -> HashSet<(T, T)> { seq.windows(2).map(|w| (w[0], w[1])).collect() };
    let predicted = edges(p);
    let reference = edges(g);
    if predicted.is_empty() || reference.is_empty() {
        return None;
    }
    let matched = predicted.intersection(&reference).count();
    Some(RecallPrecision::ratio(matched, reference.len(), predicted.len()))
}

/// 1 iff the last elements agree
pub fn error_location<T: PartialEq>(p: &[T], g: &[T]) -> Option<u8> {
    match (p.last(), g.last()) {
        (Some(a), Some(b)) => Some(u8::from(a == b)),
        _ => None,
    }
}

/// Metrics that depend on scoring configuration
pub struct ExecutionComparator<'a> {
    config: &'a ScoringConfig,
}

impl<'a> ExecutionComparator<'a> {
    pub fn new(config: &'a ScoringConfig) -> Self {
        Self { config }
    }

    /// Compare a predicted error label with the ground-truth exception class
    ///
    /// Only recognized classes are distinguished; any other ground-truth
    /// class counts as a match. Without ground truth the metric is undefined.
    pub fn error_type(&self, label: &str, actual_class: Option<&str>) -> Option<u8> {
        let actual = actual_class?;
        let recognized = self
            .config
            .recognized_error_classes
            .iter()
            .find(|class| actual.contains(class.as_str()));

        Some(match recognized {
            Some(class) => u8::from(label.trim().to_lowercase() == class.trim().to_lowercase()),
            None => 1,
        })
    }
}
