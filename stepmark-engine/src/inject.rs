//! Injection pipeline
//!
//! Chains the engine together for one document: resolve the format, scan,
//! assign every test's steps, render annotations and apply them as one batch.
//! Nothing here touches the filesystem; the caller decides whether the
//! resulting text is written back.

use crate::action::Action;
use crate::assign::{Assigner, Placement};
use crate::error::InjectError;
use crate::format::CommentSyntax;
use crate::mutate::{apply_with_report, PlannedInsertion, UpdateOperation};
use crate::reader::read_annotations;
use crate::registry::FormatRegistry;
use crate::scanner::{scan, LineIndex};
use crate::serialize::{serialize_step, serialize_test_end, serialize_test_start, Syntax};
use crate::step::{TestCase, TestSuite};
use serde::Serialize;

/// Knobs for one injection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InjectOptions {
    pub syntax: Syntax,
    /// Original lines shown around each planned insertion.
    pub context_lines: usize,
}

impl Default for InjectOptions {
    fn default() -> Self {
        InjectOptions {
            syntax: Syntax::Json,
            context_lines: 1,
        }
    }
}

/// A step that found no content to sit next to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnmatchedStep {
    /// Index within the step's own test.
    pub step_index: usize,
    pub action: Action,
    /// 1-based line the annotation was placed after (or before, on line 1).
    pub suggested_line: usize,
}

/// Unmatched steps of one test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnmatchedTest {
    pub test_id: Option<String>,
    pub steps: Vec<UnmatchedStep>,
}

/// Everything an injection run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InjectReport {
    pub format: String,
    pub result: String,
    pub step_count: usize,
    pub matched_steps: usize,
    pub annotations_added: usize,
    pub lines_added: usize,
    pub insertions: Vec<PlannedInsertion>,
    #[serde(rename = "unmatchedSteps")]
    pub unmatched: Vec<UnmatchedTest>,
    pub existing_annotations: usize,
}

impl InjectReport {
    pub fn unmatched_count(&self) -> usize {
        self.unmatched.iter().map(|t| t.steps.len()).sum()
    }
}

/// Inject `suite` into `source`, whose format is picked from `path`.
pub fn inject(
    registry: &FormatRegistry,
    path: &str,
    source: &str,
    suite: &TestSuite,
    options: &InjectOptions,
) -> Result<InjectReport, InjectError> {
    let format = registry.resolve_format(path);
    let matches = scan(source, format.patterns);
    let existing_annotations = read_annotations(source, format.comment_syntax).len();
    let lines = LineIndex::new(source);

    let mut assigner = Assigner::new(&matches);
    let mut operations = Vec::new();
    let mut unmatched = Vec::new();
    let mut matched_steps = 0;

    for test in &suite.tests {
        let mut test_ops = Vec::with_capacity(test.steps.len());
        let mut missing = Vec::new();

        for (step_index, assignment) in assigner.assign(&test.steps).into_iter().enumerate() {
            let text = serialize_step(assignment.step, options.syntax, format.comment_syntax)?;
            match assignment.placement {
                Placement::Matched { content, .. } => {
                    matched_steps += 1;
                    let anchor = last_char_start(source, content.end).max(content.start);
                    test_ops.push(UpdateOperation::after(anchor, text));
                }
                Placement::Unmatched { suggested_offset: 0 } => {
                    missing.push(UnmatchedStep {
                        step_index,
                        action: assignment.step.action(),
                        suggested_line: 1,
                    });
                    test_ops.push(UpdateOperation::before(0, text));
                }
                Placement::Unmatched { suggested_offset } => {
                    let anchor = last_char_start(source, suggested_offset);
                    missing.push(UnmatchedStep {
                        step_index,
                        action: assignment.step.action(),
                        suggested_line: lines.line_of(anchor),
                    });
                    test_ops.push(UpdateOperation::after(anchor, text));
                }
            }
        }

        if !missing.is_empty() {
            unmatched.push(UnmatchedTest {
                test_id: test.meta.id.clone(),
                steps: missing,
            });
        }
        bracket(test, test_ops, options.syntax, format.comment_syntax, &mut operations)?;
    }

    let outcome = apply_with_report(source, &operations, options.context_lines)?;
    tracing::debug!(
        format = format.name,
        steps = suite.step_count(),
        matched = matched_steps,
        annotations = operations.len(),
        "injection planned"
    );

    Ok(InjectReport {
        format: format.name.to_string(),
        result: outcome.text,
        step_count: suite.step_count(),
        matched_steps,
        annotations_added: operations.len(),
        lines_added: outcome.lines_added,
        insertions: outcome.insertions,
        unmatched,
        existing_annotations,
    })
}

/// Push a test's step operations, wrapped in start and end markers when the
/// test carries metadata. Markers are pushed first and last so that ties on a
/// line resolve around the steps.
fn bracket(
    test: &TestCase,
    steps: Vec<UpdateOperation>,
    syntax: Syntax,
    comment: &CommentSyntax,
    operations: &mut Vec<UpdateOperation>,
) -> Result<(), InjectError> {
    let first = steps.iter().map(|op| op.offset).min();
    let last = steps.iter().map(|op| op.offset).max();

    match (first, last) {
        (Some(first), Some(last)) if !test.meta.is_empty() => {
            operations.push(UpdateOperation::before(
                first,
                serialize_test_start(&test.meta, syntax, comment)?,
            ));
            operations.extend(steps);
            operations.push(UpdateOperation::after(last, serialize_test_end(comment)));
        }
        _ => operations.extend(steps),
    }
    Ok(())
}

/// Offset of the last character before `end`, so a match that stops right
/// after a newline still anchors on its own line.
fn last_char_start(source: &str, end: usize) -> usize {
    source
        .get(..end)
        .and_then(|head| head.char_indices().next_back())
        .map_or(0, |(i, _)| i)
}
