//! Content scanner
//!
//! Runs every pattern over the whole document and collects one
//! [`ContentMatch`] per hit. Matches are independent of any step list:
//! the same document and pattern set always produce the same ordered list.
//!
//! Overlapping hits from different patterns are kept. The assignment engine
//! resolves contention through its no-reuse rule.

use crate::action::{Action, Field};
use crate::pattern::Pattern;
use serde::Serialize;

/// One located occurrence of a pattern in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMatch {
    pub pattern: String,
    pub actions: Vec<Action>,
    /// Captured values in the pattern's mapping order; the first is primary.
    pub values: Vec<(Field, String)>,
    pub text: String,
    /// Byte offset of the first matched byte.
    pub start: usize,
    /// Byte offset one past the last matched byte.
    pub end: usize,
    /// 1-based line of `start`.
    pub line: usize,
}

impl ContentMatch {
    /// Whether this match can carry a step with the given action.
    pub fn supports(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }

    /// The primary captured value.
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(|(_, v)| v.as_str())
    }

    /// The value captured for a specific field.
    pub fn field(&self, field: Field) -> Option<&str> {
        self.values
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    }
}

/// Scan `text` with `patterns`, returning matches sorted by start offset.
///
/// The sort is stable, so matches starting at the same offset keep pattern
/// registration order (then alternative order within a pattern).
pub fn scan(text: &str, patterns: &[Pattern]) -> Vec<ContentMatch> {
    let lines = LineIndex::new(text);
    let mut matches = Vec::new();

    for pattern in patterns {
        for regex in pattern.regexes() {
            for caps in regex.captures_iter(text) {
                let Some(whole) = caps.get(0) else {
                    continue;
                };
                let values = pattern
                    .captures()
                    .iter()
                    .filter_map(|(group, field)| {
                        let value = if *group == 0 {
                            Some(whole.as_str())
                        } else {
                            caps.get(*group).map(|m| m.as_str())
                        };
                        value.map(|v| (*field, v.to_string()))
                    })
                    .collect();

                matches.push(ContentMatch {
                    pattern: pattern.name().to_string(),
                    actions: pattern.actions().to_vec(),
                    values,
                    text: whole.as_str().to_string(),
                    start: whole.start(),
                    end: whole.end(),
                    line: lines.line_of(whole.start()),
                });
            }
        }
    }

    matches.sort_by_key(|m| m.start);
    tracing::debug!(
        patterns = patterns.len(),
        matches = matches.len(),
        "document scanned"
    );
    matches
}

/// Byte offsets of line starts, for offset → line lookups.
pub(crate) struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub(crate) fn new(text: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        LineIndex { starts }
    }

    /// 1-based line containing `offset`.
    pub(crate) fn line_of(&self, offset: usize) -> usize {
        match self.starts.binary_search(&offset) {
            Ok(idx) => idx + 1,
            Err(idx) => idx,
        }
    }
}
