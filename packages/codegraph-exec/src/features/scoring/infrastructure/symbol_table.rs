//! Symbol-table accuracy

use crate::features::scoring::domain::{Literal, PredictedState};
use crate::features::trace::domain::BlockExecutionEntry;
use tracing::debug;

/// Fraction of predicted variable values that match the ground truth
///
/// States pair up by position (stopping at the ground truth's length); pairs
/// on different blocks or without a predicted table are skipped. For every
/// predicted name also present in the ground truth, the ground-truth value
/// loses one layer of quotes and the predicted literal (first element of a
/// `(value, type)` pair) is rendered as Python's `str()` would.
///
/// In `strict` mode one unparseable predicted value makes the whole result
/// `None`; otherwise that value is skipped. `None` as well when nothing was
/// compared.
pub fn symbol_table_accuracy(
    predicted: &[PredictedState],
    actual: &[BlockExecutionEntry],
    strict: bool,
) -> Option<f64> {
    let mut correct = 0usize;
    let mut incorrect = 0usize;

    for (state, entry) in predicted.iter().zip(actual) {
        if state.block_id != entry.block_id {
            continue;
        }
        let Some(table) = &state.symbol_table else {
            continue;
        };

        for (name, raw) in table {
            let Some(expected) = entry.state.get(name) else {
                continue;
            };

            let value = match Literal::parse(raw) {
                Ok(literal) => literal.value_part().to_python_str(),
                Err(e) if strict => {
                    debug!("Unparseable predicted value for '{}': {}", name, e);
                    return None;
                }
                Err(_) => continue,
            };

            if value.trim() == strip_quotes(expected).trim() {
                correct += 1;
            } else {
                incorrect += 1;
            }
        }
    }

    let total = correct + incorrect;
    (total > 0).then(|| correct as f64 / total as f64)
}

/// Drop one leading and one trailing quote character
fn strip_quotes(value: &str) -> &str {
    const QUOTES: &[char] = &['"', '\''];
    let value = value.strip_prefix(QUOTES).unwrap_or(value);
    value.strip_suffix(QUOTES).unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::StateMap;
    use std::collections::BTreeMap;

    fn predicted(block_id: u32, pairs: &[(&str, &str)]) -> PredictedState {
        PredictedState {
            block_id,
            symbol_table: Some(
                pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect::<BTreeMap<_, _>>(),
            ),
        }
    }

    fn actual(block_id: u32, pairs: &[(&str, &str)]) -> BlockExecutionEntry {
        BlockExecutionEntry {
            block_id,
            state: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<StateMap>(),
        }
    }

    #[test]
    fn test_quoted_prediction_matches_number() {
        let score = symbol_table_accuracy(&[predicted(1, &[("x", "'5'")])], &[actual(1, &[("x", "5")])], true);
        assert_eq!(score, Some(1.0));
    }

    #[test]
    fn test_ground_truth_quotes_stripped() {
        let score = symbol_table_accuracy(
            &[predicted(1, &[("s", "'abc'"), ("n", "(2, int)")])],
            &[actual(1, &[("s", "'abc'"), ("n", "3")])],
            true,
        );
        assert_eq!(score, Some(0.5));
    }

    #[test]
    fn test_mismatched_blocks_and_extra_states_skipped() {
        let score = symbol_table_accuracy(
            &[
                predicted(2, &[("x", "1")]),
                predicted(2, &[("x", "1")]),
                predicted(3, &[("x", "1")]),
            ],
            &[actual(1, &[("x", "1")]), actual(2, &[("x", "1")])],
            true,
        );
        assert_eq!(score, Some(1.0));
    }

    #[test]
    fn test_strictness() {
        let p = [predicted(1, &[("x", "foo("), ("y", "2")])];
        let g = [actual(1, &[("x", "1"), ("y", "2")])];
        assert_eq!(symbol_table_accuracy(&p, &g, true), None);
        assert_eq!(symbol_table_accuracy(&p, &g, false), Some(1.0));
    }

    #[test]
    fn test_nothing_comparable() {
        let p = [predicted(1, &[("z", "1")])];
        let g = [actual(1, &[("x", "1")])];
        assert_eq!(symbol_table_accuracy(&p, &g, true), None);
        assert_eq!(symbol_table_accuracy(&[], &g, true), None);
    }
}
