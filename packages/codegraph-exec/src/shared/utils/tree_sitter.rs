//! Tree-sitter Utility Functions
//!
//! Parsing and traversal helpers for Python submissions.

use tree_sitter::{Node, Parser, Tree};

// ═══════════════════════════════════════════════════════════════════════════
// Parsing
// ═══════════════════════════════════════════════════════════════════════════

/// Parse Python source, rejecting trees that contain syntax errors
pub fn parse_python(source: &str) -> Result<Tree, String> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::language())
        .map_err(|e| format!("Failed to set language: {}", e))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| "Failed to parse content".to_string())?;

    if tree.root_node().has_error() {
        return Err("source contains syntax errors".to_string());
    }
    Ok(tree)
}

// ═══════════════════════════════════════════════════════════════════════════
// Node Traversal Utilities
// ═══════════════════════════════════════════════════════════════════════════

/// Find the first node (pre-order) of one of `kinds` that starts on `row`
///
/// Rows are 0-based as in tree-sitter positions.
pub fn find_node_starting_at_row<'a>(root: Node<'a>, row: usize, kinds: &[&str]) -> Option<Node<'a>> {
    let mut stack = vec![root];
    while let Some(current) = stack.pop() {
        // Subtrees entirely above or below the row cannot contain a match
        if current.end_position().row < row || current.start_position().row > row {
            continue;
        }
        if current.start_position().row == row && kinds.contains(&current.kind()) {
            return Some(current);
        }
        for i in (0..current.child_count()).rev() {
            if let Some(child) = current.child(i) {
                stack.push(child);
            }
        }
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
// Text Extraction Utilities
// ═══════════════════════════════════════════════════════════════════════════

/// Extract text content from a node
#[inline]
pub fn extract_node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

/// Node text with line breaks (and their indentation) folded into one space
pub fn extract_single_line_text(node: &Node, source: &str) -> String {
    let text = extract_node_text(node, source);
    if !text.contains('\n') {
        return text.to_string();
    }
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strip one redundant pair of grouping parentheses
pub fn unwrap_parenthesized<'a>(node: Node<'a>) -> Node<'a> {
    if node.kind() == "parenthesized_expression" {
        if let Some(inner) = node.named_child(0) {
            return inner;
        }
    }
    node
}

// ═══════════════════════════════════════════════════════════════════════════
// Expression Rendering
// ═══════════════════════════════════════════════════════════════════════════

/// Node kinds re-printed token by token; every other kind keeps its folded
/// source text
const RENDERED_KINDS: &[&str] = &[
    "binary_operator",
    "comparison_operator",
    "boolean_operator",
    "not_operator",
    "unary_operator",
    "conditional_expression",
    "parenthesized_expression",
    "call",
    "argument_list",
    "keyword_argument",
    "attribute",
    "subscript",
    "slice",
    "list",
    "tuple",
    "set",
    "dictionary",
    "pair",
];

/// Kinds whose operator tokens are padded with one space on each side
const SPACED_KINDS: &[&str] = &[
    "binary_operator",
    "comparison_operator",
    "boolean_operator",
    "conditional_expression",
];

/// Render an expression with normalized spacing and quoting
///
/// Binary, comparison and boolean operators get one space on each side,
/// commas are followed by one space, trailing commas are dropped (except in
/// a one-element tuple) and plain string literals are re-quoted the way
/// Python's `repr` quotes them. Parentheses are kept as written.
pub fn render_expression(node: &Node, source: &str) -> String {
    let mut out = String::new();
    write_expression(*node, source, &mut out);
    out
}

fn write_expression(node: Node, source: &str, out: &mut String) {
    let kind = node.kind();
    if kind == "string" {
        out.push_str(&normalize_string_literal(extract_node_text(&node, source)));
        return;
    }
    if node.child_count() == 0 {
        out.push_str(extract_node_text(&node, source));
        return;
    }
    if !RENDERED_KINDS.contains(&kind) {
        out.push_str(&extract_single_line_text(&node, source));
        return;
    }

    let children: Vec<Node> = (0..node.child_count()).filter_map(|i| node.child(i)).collect();
    for (index, child) in children.iter().enumerate() {
        if child.kind() == "comment" {
            continue;
        }
        if child.is_named() {
            write_expression(*child, source, out);
            continue;
        }

        let token = collapse_whitespace(extract_node_text(child, source));
        match token.as_str() {
            "," => {
                let closes = children
                    .get(index + 1)
                    .map_or(true, |next| matches!(next.kind(), ")" | "]" | "}"));
                if !closes {
                    out.push_str(", ");
                } else if kind == "tuple" && node.named_child_count() == 1 {
                    out.push(',');
                }
            }
            ":" if kind == "pair" => out.push_str(": "),
            "not" if kind == "not_operator" => out.push_str("not "),
            _ if SPACED_KINDS.contains(&kind) => {
                out.push(' ');
                out.push_str(&token);
                out.push(' ');
            }
            _ => out.push_str(&token),
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Re-quote a plain string literal; prefixed literals and literals with
/// escapes or line breaks keep their source text
fn normalize_string_literal(text: &str) -> String {
    let Some(quote_at) = text.find(['\'', '"']) else {
        return text.to_string();
    };
    let prefix = &text[..quote_at];
    if !(prefix.is_empty() || prefix.eq_ignore_ascii_case("u")) {
        return text.to_string();
    }

    let literal = &text[quote_at..];
    let width = if literal.starts_with("\"\"\"") || literal.starts_with("'''") { 3 } else { 1 };
    if literal.len() < 2 * width {
        return text.to_string();
    }
    let content = &literal[width..literal.len() - width];
    if content.contains(['\\', '\n']) {
        return text.to_string();
    }

    if content.contains('\'') && !content.contains('"') {
        format!("\"{}\"", content)
    } else {
        format!("'{}'", content.replace('\'', "\\'"))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_python_rejects_syntax_errors() {
        assert!(parse_python("x = 1\n").is_ok());
        assert!(parse_python("for x in :\n").is_err());
    }

    #[test]
    fn test_find_node_starting_at_row() {
        let code = "x = 1\nfor i in range(3):\n    if i > 1:\n        x += i\n";
        let tree = parse_python(code).unwrap();
        let root = tree.root_node();

        let for_node = find_node_starting_at_row(root, 1, &["for_statement"]).unwrap();
        assert_eq!(for_node.kind(), "for_statement");

        let if_node = find_node_starting_at_row(root, 2, &["if_statement"]).unwrap();
        assert_eq!(if_node.start_position().row, 2);

        assert!(find_node_starting_at_row(root, 0, &["for_statement"]).is_none());
    }

    #[test]
    fn test_unwrap_parenthesized() {
        let code = "if (x > 1):\n    pass\n";
        let tree = parse_python(code).unwrap();
        let if_node = find_node_starting_at_row(tree.root_node(), 0, &["if_statement"]).unwrap();
        let condition = unwrap_parenthesized(if_node.child_by_field_name("condition").unwrap());
        assert_eq!(extract_node_text(&condition, code), "x > 1");
    }

    #[test]
    fn test_extract_single_line_text() {
        let code = "for v in [1,\n          2]:\n    pass\n";
        let tree = parse_python(code).unwrap();
        let for_node = find_node_starting_at_row(tree.root_node(), 0, &["for_statement"]).unwrap();
        let right = for_node.child_by_field_name("right").unwrap();
        assert_eq!(extract_single_line_text(&right, code), "[1, 2]");
    }

    fn first_expression(code: &str, row: usize, kind: &str, field: &str) -> String {
        let tree = parse_python(code).unwrap();
        let node = find_node_starting_at_row(tree.root_node(), row, &[kind]).unwrap();
        render_expression(&node.child_by_field_name(field).unwrap(), code)
    }

    #[test]
    fn test_render_expression_normalizes_spacing() {
        let code = "if x>0 and s==\"a\":\n    pass\n";
        assert_eq!(first_expression(code, 0, "if_statement", "condition"), "x > 0 and s == 'a'");

        let code = "for v in range(0,n):\n    pass\n";
        assert_eq!(first_expression(code, 0, "for_statement", "right"), "range(0, n)");

        let code = "if not  (a  in  b)or c[i:j]  is not None:\n    pass\n";
        assert_eq!(
            first_expression(code, 0, "if_statement", "condition"),
            "not (a in b) or c[i:j] is not None"
        );
    }

    #[test]
    fn test_render_expression_collections() {
        let code = "for k in {'a':1,'b':f(x,key=2),}:\n    pass\n";
        assert_eq!(
            first_expression(code, 0, "for_statement", "right"),
            "{'a': 1, 'b': f(x, key=2)}"
        );

        let code = "for t in (1,):\n    pass\n";
        assert_eq!(first_expression(code, 0, "for_statement", "right"), "(1,)");

        let code = "for t in [1,\n          -2]:\n    pass\n";
        assert_eq!(first_expression(code, 0, "for_statement", "right"), "[1, -2]");
    }

    #[test]
    fn test_normalize_string_literal() {
        assert_eq!(normalize_string_literal("\"abc\""), "'abc'");
        assert_eq!(normalize_string_literal("\"it's\""), "\"it's\"");
        assert_eq!(normalize_string_literal("'say \"hi\"'"), "'say \"hi\"'");
        assert_eq!(normalize_string_literal("\"\"\"doc\"\"\""), "'doc'");
        assert_eq!(normalize_string_literal("r\"a\\d\""), "r\"a\\d\"");
        assert_eq!(normalize_string_literal("f\"{x}\""), "f\"{x}\"");
        assert_eq!(normalize_string_literal("\"a\\n\""), "\"a\\n\"");
    }
}
