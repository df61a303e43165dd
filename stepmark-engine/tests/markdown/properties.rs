//! Property tests for scanning and batch mutation

use proptest::prelude::*;
use std::collections::BTreeMap;
use stepmark_engine::{apply, apply_with_report, scan, FormatRegistry, UpdateOperation};

const LINES: &[&str] = &[
    "Click **Save**.",
    "  - Go to [Home](https://example.com).",
    "",
    "Type \"hello\" and press `Enter`.",
    "![shot](img/a.png)",
    "plain text",
    "\tTabbed **Label** with [link](https://a.test)",
];

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(LINES), 1..12).prop_map(|lines| lines.join("\n") + "\n")
}

/// A document and a set of operations with distinct (offset, direction) pairs.
fn document_and_operations() -> impl Strategy<Value = (String, Vec<UpdateOperation>)> {
    document().prop_flat_map(|doc| {
        let len = doc.len();
        let ops = prop::collection::vec((0..=len, any::<bool>()), 0..10).prop_map(|picks| {
            let unique: BTreeMap<(usize, bool), ()> = picks.into_iter().map(|p| (p, ())).collect();
            unique
                .into_keys()
                .enumerate()
                .map(|(n, (offset, after))| UpdateOperation {
                    offset,
                    text: format!("<!-- step {{\"find\":\"marker-{n}\"}} -->"),
                    insert_after: after,
                })
                .collect::<Vec<_>>()
        });
        (Just(doc), ops)
    })
}

proptest! {
    #[test]
    fn scan_is_idempotent(doc in document()) {
        let registry = FormatRegistry::with_defaults();
        let patterns = registry.patterns("markdown").unwrap();
        prop_assert_eq!(scan(&doc, patterns), scan(&doc, patterns));
    }

    #[test]
    fn apply_ignores_operation_order((doc, ops) in document_and_operations()) {
        let mut reversed = ops.clone();
        reversed.reverse();
        let mut by_offset = ops.clone();
        by_offset.sort_by_key(|op| std::cmp::Reverse(op.offset));

        let expected = apply(&doc, &ops).unwrap();
        prop_assert_eq!(&apply(&doc, &reversed).unwrap(), &expected);
        prop_assert_eq!(&apply(&doc, &by_offset).unwrap(), &expected);
    }

    #[test]
    fn every_annotation_lands_once_where_reported((doc, ops) in document_and_operations()) {
        let outcome = apply_with_report(&doc, &ops, 1).unwrap();
        let lines: Vec<&str> = outcome.text.lines().collect();

        prop_assert_eq!(lines.len(), doc.lines().count() + ops.len());
        prop_assert_eq!(outcome.lines_added, ops.len());
        for op in &ops {
            prop_assert_eq!(outcome.text.matches(op.text.as_str()).count(), 1);
        }
        for insertion in &outcome.insertions {
            prop_assert_eq!(lines[insertion.line - 1], insertion.content.as_str());
        }
    }
}
