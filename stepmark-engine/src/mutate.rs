//! Batch mutator
//!
//! Applies many line insertions to one document in a single pass. Every
//! operation is first resolved against the original text to a splice
//! position: the start of its target line for insert-before, or just past the
//! line's newline for insert-after. Splices then run in strictly descending
//! position order, so no splice can move a position that is still pending.
//!
//! At one position the final document shows insert-after operations first,
//! then insert-before operations, each group by ascending offset and then
//! input order. Several annotations aimed at one line therefore keep the
//! order their steps were given in.
//!
//! A document that uses `\r\n` anywhere gets `\r\n` after every inserted
//! line as well.

use crate::error::MutationError;
use serde::Serialize;

/// One text insertion relative to the line containing `offset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOperation {
    pub offset: usize,
    /// Rendered annotation, without indentation or trailing newline.
    pub text: String,
    pub insert_after: bool,
}

impl UpdateOperation {
    pub fn before(offset: usize, text: impl Into<String>) -> Self {
        UpdateOperation {
            offset,
            text: text.into(),
            insert_after: false,
        }
    }

    pub fn after(offset: usize, text: impl Into<String>) -> Self {
        UpdateOperation {
            offset,
            text: text.into(),
            insert_after: true,
        }
    }
}

/// Where an insertion landed in the new document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedInsertion {
    /// 1-based line of the first inserted line, in the new document.
    pub line: usize,
    /// Inserted lines, indentation included.
    pub content: String,
    pub context_before: Vec<String>,
    pub context_after: Vec<String>,
}

/// A mutated document together with where everything went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome {
    pub text: String,
    /// In document order.
    pub insertions: Vec<PlannedInsertion>,
    pub lines_added: usize,
}

/// Ordering key: splice position, after-before-before, offset, input order.
type SortKey = (usize, u8, usize, usize);

#[derive(Debug)]
struct Resolved {
    key: SortKey,
    /// Index of the original line the insertion lands in front of.
    line_index: usize,
    /// Indented annotation lines, joined with `\n`.
    content: String,
    /// Insert after the final line of a document with no trailing newline.
    leading_newline: bool,
    eol: &'static str,
}

impl Resolved {
    fn position(&self) -> usize {
        self.key.0
    }

    fn splice_text(&self) -> String {
        let content = self.content.replace('\n', self.eol);
        if self.leading_newline {
            format!("{}{content}", self.eol)
        } else {
            format!("{content}{}", self.eol)
        }
    }

    fn line_count(&self) -> usize {
        self.content.split('\n').count()
    }
}

/// Apply every operation to `doc`.
///
/// Fails without applying anything if any offset lies outside the document
/// or inside a multi-byte character.
pub fn apply(doc: &str, operations: &[UpdateOperation]) -> Result<String, MutationError> {
    let resolved = resolve(doc, operations)?;
    Ok(splice(doc, &resolved))
}

/// [`apply`], plus a per-insertion report with up to `context` original
/// lines on either side.
pub fn apply_with_report(
    doc: &str,
    operations: &[UpdateOperation],
    context: usize,
) -> Result<MutationOutcome, MutationError> {
    let resolved = resolve(doc, operations)?;
    let text = splice(doc, &resolved);
    let original: Vec<&str> = doc.lines().collect();

    let mut insertions = Vec::with_capacity(resolved.len());
    let mut lines_added = 0;
    for op in &resolved {
        let line = op.line_index + 1 + lines_added;
        let k = op.line_index.min(original.len());
        insertions.push(PlannedInsertion {
            line,
            content: op.content.clone(),
            context_before: to_owned(&original[k.saturating_sub(context)..k]),
            context_after: to_owned(&original[k..(k + context).min(original.len())]),
        });
        lines_added += op.line_count();
    }

    Ok(MutationOutcome {
        text,
        insertions,
        lines_added,
    })
}

/// Validate and resolve every operation, returned in ascending key order.
fn resolve(doc: &str, operations: &[UpdateOperation]) -> Result<Vec<Resolved>, MutationError> {
    let mut resolved = Vec::with_capacity(operations.len());
    let eol = if doc.contains("\r\n") { "\r\n" } else { "\n" };

    for (index, op) in operations.iter().enumerate() {
        if op.offset > doc.len() {
            return Err(MutationError::OffsetOutOfBounds {
                index,
                offset: op.offset,
                len: doc.len(),
            });
        }
        if !doc.is_char_boundary(op.offset) {
            return Err(MutationError::NotCharBoundary {
                index,
                offset: op.offset,
            });
        }

        let line_start = doc[..op.offset].rfind('\n').map_or(0, |i| i + 1);
        let indent = leading_whitespace(&doc[line_start..]);
        let content = indent_lines(&op.text, indent);

        let (position, leading_newline) = if op.insert_after {
            match doc[op.offset..].find('\n') {
                Some(i) => (op.offset + i + 1, false),
                None => (doc.len(), !doc.is_empty() && !doc.ends_with('\n')),
            }
        } else {
            (line_start, false)
        };

        let kind = if op.insert_after { 0 } else { 1 };
        resolved.push(Resolved {
            key: (position, kind, op.offset, index),
            line_index: doc[..position].matches('\n').count() + usize::from(leading_newline),
            content,
            leading_newline,
            eol,
        });
    }

    resolved.sort_by_key(|r| r.key);
    Ok(resolved)
}

fn splice(doc: &str, resolved: &[Resolved]) -> String {
    let mut out = doc.to_string();
    let mut last: Option<SortKey> = None;

    for op in resolved.iter().rev() {
        debug_assert!(
            last.map_or(true, |prev| op.key < prev),
            "splices must run in strictly descending order"
        );
        last = Some(op.key);
        out.insert_str(op.position(), &op.splice_text());
    }

    tracing::debug!(operations = resolved.len(), "batch applied");
    out
}

fn leading_whitespace(line: &str) -> &str {
    let end = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..end]
}

fn indent_lines(text: &str, indent: &str) -> String {
    text.split('\n')
        .map(|line| format!("{indent}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn to_owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|l| l.to_string()).collect()
}
