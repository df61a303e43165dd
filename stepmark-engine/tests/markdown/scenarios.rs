//! Injection scenarios for Markdown documents

use crate::common::{fixture, run};
use insta::assert_snapshot;
use serde_json::json;
use stepmark_engine::{scan, Action, Field, FormatRegistry, TestSuite};

#[test]
fn test_go_to_link_scores_exact_and_keeps_indentation() {
    let source = "Steps:\n\n  Go to [Example](https://example.com) to begin.\n";
    let registry = FormatRegistry::with_defaults();
    let matches = scan(source, registry.patterns("markdown").unwrap());

    let go_to: Vec<_> = matches.iter().filter(|m| m.supports(Action::GoTo)).collect();
    assert_eq!(go_to.len(), 1);
    assert_eq!(go_to[0].line, 3);
    assert_eq!(go_to[0].field(Field::Url), Some("https://example.com"));

    let report = run("intro.md", source, json!([{ "goTo": "https://example.com" }]));
    assert_eq!(
        report.result,
        "Steps:\n\n  Go to [Example](https://example.com) to begin.\n  \
         <!-- step {\"goTo\":\"https://example.com\"} -->\n"
    );
    assert_eq!(report.insertions[0].line, 4);
    assert_eq!(report.insertions[0].context_before, vec!["  Go to [Example](https://example.com) to begin."]);
}

#[test]
fn test_unmatched_first_step_lands_at_document_start() {
    let source = "# Title\n\nSome *emphasis* but nothing bold.\n";
    let report = run("doc.md", source, json!([{ "find": "NonexistentText12345" }]));

    assert_eq!(
        report.result,
        "<!-- step {\"find\":\"NonexistentText12345\"} -->\n# Title\n\nSome *emphasis* but nothing bold.\n"
    );
    assert_eq!(report.matched_steps, 0);
    assert_eq!(report.unmatched.len(), 1);
    assert_eq!(report.unmatched[0].test_id, None);
    assert_eq!(report.unmatched[0].steps[0].step_index, 0);
    assert_eq!(report.unmatched[0].steps[0].action, Action::Find);
    assert_eq!(report.unmatched[0].steps[0].suggested_line, 1);
}

#[test]
fn test_three_steps_in_reading_order() {
    let source = "Go to [Home](https://example.com).\nClick **Save**.\nPress `Enter`.\n";
    let report = run(
        "order.md",
        source,
        json!([
            { "goTo": "https://example.com" },
            { "click": "Save" },
            { "type": "Enter" }
        ]),
    );

    let lines: Vec<_> = report.result.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Go to [Home](https://example.com).",
            r#"<!-- step {"goTo":"https://example.com"} -->"#,
            "Click **Save**.",
            r#"<!-- step {"click":"Save"} -->"#,
            "Press `Enter`.",
            r#"<!-- step {"type":"Enter"} -->"#,
        ]
    );
    assert_eq!(report.lines_added, 3);
}

#[test]
fn test_duplicate_content_first_occurrence_wins() {
    let source = "Find **Save** here.\nAnd **Save** again.\n";
    let report = run("dup.md", source, json!([{ "find": "Save" }, { "find": "Save" }]));
    let lines: Vec<_> = report.insertions.iter().map(|i| i.line).collect();
    assert_eq!(lines, vec![2, 4]);
}

#[test]
fn test_shortfall_places_after_previous_match() {
    let source = "Click **Save**.\n\nUnrelated text.\n";
    let report = run(
        "short.md",
        source,
        json!({ "testId": "t", "steps": [{ "click": "Save" }, { "find": "Missing" }] }),
    );
    assert_eq!(
        report.result,
        "<!-- test {\"testId\":\"t\"} -->\nClick **Save**.\n\
         <!-- step {\"click\":\"Save\"} -->\n\
         <!-- step {\"find\":\"Missing\"} -->\n\
         <!-- test end -->\n\nUnrelated text.\n"
    );
    assert_eq!(report.unmatched[0].test_id.as_deref(), Some("t"));
    assert_eq!(report.unmatched[0].steps[0].step_index, 1);
    assert_eq!(report.unmatched[0].steps[0].suggested_line, 1);
}

#[test]
fn test_existing_annotations_are_counted() {
    let source = "Click **Save**.\n<!-- step {\"click\":\"Save\"} -->\n";
    let report = run("again.md", source, json!([]));
    assert_eq!(report.existing_annotations, 1);
    assert_eq!(report.result, source);
}

#[test]
fn test_getting_started_fixture() {
    let source = fixture("getting-started.md");
    let suite: serde_json::Value =
        serde_json::from_str(&fixture("getting-started.json")).unwrap();
    let report = run("getting-started.md", &source, suite);

    assert_eq!(report.step_count, 8);
    assert_eq!(report.matched_steps, 8);
    assert!(report.unmatched.is_empty());
    assert_eq!(report.annotations_added, 10);
    assert_snapshot!(report.result, @r###"
# Getting started

<!-- test {"testId":"getting-started"} -->
Go to [the dashboard](https://app.example.com/dashboard) to begin.
<!-- step {"goTo":"https://app.example.com/dashboard"} -->

1. Click **New project**.
<!-- step {"click":"New project"} -->
2. In the **Name** field, type "Demo".
<!-- step {"find":"Name"} -->
<!-- step {"type":"Demo"} -->
   - Press `Enter` to confirm.
   <!-- step {"type":"$ENTER$"} -->

![Project list](images/projects.png)
<!-- step {"screenshot":"images/projects.png"} -->

```bash
npm run deploy
```
<!-- step {"runShell":"npm run deploy"} -->

Read the [API reference](https://docs.example.com/api) for details.
<!-- step {"checkLink":"https://docs.example.com/api"} -->
<!-- test end -->
"###);
}

#[test]
fn test_suite_file_shapes_agree() {
    let as_tests = TestSuite::from_json(r#"{"tests":[{"steps":[{"find":"a"}]}]}"#).unwrap();
    let as_test = TestSuite::from_json(r#"{"steps":[{"find":"a"}]}"#).unwrap();
    let as_array = TestSuite::from_yaml("- find: a\n").unwrap();
    assert_eq!(as_tests, as_test);
    assert_eq!(as_test, as_array);
}
