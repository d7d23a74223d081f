//! Test fixture generators
//!
//! The sample program is wrapped by the collaborators in a one-line
//! `def test_function():` header, so raw CFG and log lines are one ahead of
//! submission lines.

use codegraph_exec::features::flow_graph::domain::{
    RawBlock, RawBranches, RawCfg, RawControlNode, StatementKind,
};
use codegraph_exec::pipeline::Submission;

/// Branching program used across the integration tests
pub const IF_PROGRAM: &str = "x = 1\nif x > 0:\n    y = x + 1\nprint(y)\n";

/// Program that raises on its second line
pub const RAISING_PROGRAM: &str = "x = 'a'\ny = x + 1\n";

pub fn raw_block(lines: &[u32]) -> RawBlock {
    RawBlock::with_nodes(
        lines
            .iter()
            .map(|&l| RawControlNode::new(l, StatementKind::Other, ""))
            .collect(),
    )
}

/// Raw CFG of [`IF_PROGRAM`] as an external builder reports it
pub fn if_program_raw_cfg() -> RawCfg {
    let mut head = raw_block(&[2, 3]);
    head.nodes[1].statement_kind = StatementKind::If;
    head.branches = Some(RawBranches {
        on_true: 2,
        on_false: 3,
    });
    let mut then = raw_block(&[4]);
    then.next = vec![3];

    RawCfg::new(vec![RawBlock::labelled("<entry:testFun>"), head, then, raw_block(&[5])])
}

/// Raw CFG of [`RAISING_PROGRAM`], in the JSON document form
pub fn raising_program_raw_cfg_json() -> &'static str {
    r#"{
  "blocks": [
    {"label": "<entry:testFun>"},
    {"nodes": [{"line_number": 2}, {"line_number": 3}], "next": [2]},
    {"label": "<raise>"}
  ]
}"#
}

pub const IF_PROGRAM_CFG_TEXT: &str = "
Block 1:
Statements:
    x = 1
    (x > 0)
Next:
    If True: Go to Block 2
    If False: Go to Block 3

Block 2:
Statements:
    y = x + 1
Next:
    Go to Block 3

Block 3:
Statements:
    print(y)
Next:
    <END>
";

/// Instrumentation log of [`IF_PROGRAM`]
pub fn if_program_log() -> &'static str {
    "\
example.py:1  call  def test_function():
example.py:2  line  x = 1
example.py:3  line  if x > 0:  [x => 1]
example.py:4  line  y = x + 1  [x => 1]
example.py:5  line  print(y)  [x => 1] [y => 2]"
}

/// Instrumentation log of [`RAISING_PROGRAM`]
pub fn raising_program_log() -> &'static str {
    "\
example.py:1  call  def test_function():
example.py:2  line  x = 'a'
example.py:3  line  y = x + 1  [x => 'a']
example.py:3  exception  y = x + 1  [x => 'a']
! test_function: (<class 'TypeError'>, TypeError('can only concatenate str (not \"int\") to str'))"
}

/// Predictor walk of [`IF_PROGRAM`] that agrees with its ground truth
pub fn if_program_exact_prediction() -> &'static str {
    "\
Block 1:
Observation: x is assigned 1, the condition holds
Symbol Table: {'x': (1, int)}
Block 2:
Observation: y is assigned
Symbol Table: {'x': (1, int), 'y': (2, int)}
Block 3:
Observation: y is printed
<END>
Is Error: false"
}

/// Predictor walk of [`RAISING_PROGRAM`] that locates the error
pub fn raising_program_prediction() -> &'static str {
    "\
Block 1:
Observation: x is a string, adding an int fails
Symbol Table: {'x': ('a', str)}
<END>
Is Error: true
Error Type: <class 'TypeError'>
Block: 1"
}

pub fn submission(problem: &str, id: &str, code: &str) -> Submission {
    Submission::new(problem, id, code)
}
