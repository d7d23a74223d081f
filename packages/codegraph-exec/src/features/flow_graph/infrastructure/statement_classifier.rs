//! Statement classification
//!
//! Renders one source line as the canonical statement shown inside a block:
//! - `for i, v in xs:` → `"i <- index\n    v <- iterator"`
//! - `for x in xs:` → `"iterator -> x, Iterate Over -> xs"`
//! - `if cond:` / `elif cond:` → `"(cond)"`
//! - anything else → the stripped source line
//!
//! Loop iterables and conditions are re-printed with normalized operator
//! spacing and string quoting.
//!
//! Classification follows the syntax node that starts on the line, so a
//! `for` inside a comprehension or a `while` header falls through to the
//! stripped-line rule.

use crate::errors::{ExecError, Result};
use crate::shared::utils::tree_sitter::{
    extract_node_text, find_node_starting_at_row, parse_python, render_expression, unwrap_parenthesized,
};
use tree_sitter::{Node, Tree};

const CLASSIFIED_KINDS: &[&str] = &["for_statement", "if_statement", "elif_clause"];

/// Classifier bound to one parsed submission
pub struct StatementClassifier<'s> {
    source: &'s str,
    tree: Tree,
}

impl<'s> StatementClassifier<'s> {
    /// Parse `source`; a submission with syntax errors cannot be classified
    pub fn new(source: &'s str) -> Result<Self> {
        let tree = parse_python(source).map_err(|reason| ExecError::classification(0, reason))?;
        Ok(Self { source, tree })
    }

    /// Canonical statement for the 1-based submission `line`
    pub fn classify(&self, line: u32) -> Result<String> {
        let text = line
            .checked_sub(1)
            .and_then(|idx| self.source.split('\n').nth(idx as usize))
            .ok_or_else(|| ExecError::classification(line, "line outside the source"))?;

        let row = (line - 1) as usize;
        match find_node_starting_at_row(self.tree.root_node(), row, CLASSIFIED_KINDS) {
            Some(node) if node.kind() == "for_statement" => self.render_for(node, line),
            Some(node) => self.render_condition(node, line),
            None => Ok(text.trim().to_string()),
        }
    }

    fn render_for(&self, node: Node, line: u32) -> Result<String> {
        let left = node
            .child_by_field_name("left")
            .ok_or_else(|| ExecError::classification(line, "loop without a target"))?;
        let right = node
            .child_by_field_name("right")
            .ok_or_else(|| ExecError::classification(line, "loop without an iterable"))?;

        match left.kind() {
            "identifier" => Ok(format!(
                "iterator -> {}, Iterate Over -> {}",
                extract_node_text(&left, self.source),
                render_expression(&right, self.source)
            )),
            "pattern_list" | "tuple_pattern" => {
                let mut names = Vec::new();
                let mut cursor = left.walk();
                for element in left.named_children(&mut cursor) {
                    if element.kind() != "identifier" {
                        return Err(ExecError::classification(
                            line,
                            format!("unsupported loop target element '{}'", element.kind()),
                        ));
                    }
                    names.push(extract_node_text(&element, self.source));
                }
                match names.as_slice() {
                    [index, value, ..] => Ok(format!("{} <- index\n    {} <- iterator", index, value)),
                    _ => Err(ExecError::classification(
                        line,
                        "tuple loop target needs an index and a value",
                    )),
                }
            }
            other => Err(ExecError::classification(
                line,
                format!("unsupported loop target '{}'", other),
            )),
        }
    }

    fn render_condition(&self, node: Node, line: u32) -> Result<String> {
        let condition = node
            .child_by_field_name("condition")
            .ok_or_else(|| ExecError::classification(line, "conditional without a condition"))?;
        let condition = unwrap_parenthesized(condition);
        Ok(format!("({})", render_expression(&condition, self.source)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "total = 0\nfor i, v in enumerate(xs):\n    if (v > 2):\n        total += v\n    elif v < 0:\n        total -= 1\nfor x in range(len(xs)):\n    total += x\nwhile total > 10:\n    total -= 1\nprint(total)";

    fn classifier() -> StatementClassifier<'static> {
        StatementClassifier::new(SOURCE).unwrap()
    }

    #[test]
    fn test_plain_line_is_stripped() {
        let c = classifier();
        assert_eq!(c.classify(1).unwrap(), "total = 0");
        assert_eq!(c.classify(4).unwrap(), "total += v");
        assert_eq!(c.classify(11).unwrap(), "print(total)");
    }

    #[test]
    fn test_tuple_loop_target() {
        assert_eq!(classifier().classify(2).unwrap(), "i <- index\n    v <- iterator");
    }

    #[test]
    fn test_single_loop_target() {
        assert_eq!(
            classifier().classify(7).unwrap(),
            "iterator -> x, Iterate Over -> range(len(xs))"
        );
    }

    #[test]
    fn test_conditions() {
        let c = classifier();
        assert_eq!(c.classify(3).unwrap(), "(v > 2)");
        assert_eq!(c.classify(5).unwrap(), "(v < 0)");
    }

    #[test]
    fn test_expressions_are_normalized() {
        let c = StatementClassifier::new("if x>0 and s==\"a\":\n    pass\nfor v in range(0,n):\n    pass").unwrap();
        assert_eq!(c.classify(1).unwrap(), "(x > 0 and s == 'a')");
        assert_eq!(c.classify(3).unwrap(), "iterator -> v, Iterate Over -> range(0, n)");
    }

    #[test]
    fn test_while_is_not_classified() {
        assert_eq!(classifier().classify(9).unwrap(), "while total > 10:");
    }

    #[test]
    fn test_out_of_range_line() {
        let c = classifier();
        assert!(c.classify(0).is_err());
        assert!(c.classify(40).is_err());
    }

    #[test]
    fn test_unsupported_targets_fail() {
        let c = StatementClassifier::new("for a.b in xs:\n    pass\nfor (k,) in xs:\n    pass").unwrap();
        assert!(matches!(c.classify(1), Err(ExecError::Classification { line: 1, .. })));
        assert!(c.classify(3).is_err());
    }

    #[test]
    fn test_syntax_error_source() {
        assert!(StatementClassifier::new("if x >:\n    pass").is_err());
    }
}
