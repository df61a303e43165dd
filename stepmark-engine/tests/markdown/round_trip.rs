//! Serialized annotations read back to exactly what was written

use serde_json::{json, Value};
use stepmark_engine::format::{
    ASCIIDOC_COMMENT, HTML_COMMENT, JSX_COMMENT, XML_PROCESSING_INSTRUCTION,
};
use stepmark_engine::reader::detect_syntax;
use stepmark_engine::serialize::step_form;
use stepmark_engine::{
    apply, read_annotations, serialize_step, CommentSyntax, Step, Syntax, UpdateOperation,
};

fn steps() -> Vec<Step> {
    [
        json!({ "goTo": "https://example.com" }),
        json!({ "find": "Welcome", "timeout": 500 }),
        json!({ "click": { "elementText": "Save & exit", "selector": "#save" } }),
        json!({ "type": { "keys": ["hello", "$ENTER$"] } }),
        json!({ "httpRequest": { "url": "https://api.test/items", "method": "get", "headers": { "a": "b" } } }),
        json!({ "runShell": "echo 'a: b' | grep a" }),
        json!({ "wait": 500 }),
        json!({ "find": "true" }),
        json!({ "find": "  padded  " }),
        json!({ "stepId": "s1", "description": "Open the app", "click": { "selector": "#go" } }),
        json!({ "screenshot": "shots/a.png", "location": { "line": 3 }, "_source": "detector" }),
        json!({ "find": "Save (draft)", "timeout": 5 }),
        json!({ "click": "Open (menu)" }),
        json!({ "find": "a --> b */ c ?> d" }),
        json!({ "type": { "keys": ["x */ y", "-->"] }, "description": "close (tokens)" }),
    ]
    .into_iter()
    .map(|v| Step::from_value(v).unwrap())
    .collect()
}

fn round_trip(syntax: Syntax, comment: &CommentSyntax) {
    for step in steps() {
        let annotation = serialize_step(&step, syntax, comment).unwrap();
        let found = read_annotations(&annotation, comment);
        assert_eq!(found.len(), 1, "{annotation}");
        assert_eq!(detect_syntax(&found[0].raw), syntax, "{annotation}");
        assert_eq!(
            Value::Object(found[0].parse().unwrap()),
            Value::Object(step_form(&step)),
            "{annotation}"
        );
    }
}

const COMMENTS: [(&str, &CommentSyntax); 4] = [
    ("html", &HTML_COMMENT),
    ("jsx", &JSX_COMMENT),
    ("processing instruction", &XML_PROCESSING_INSTRUCTION),
    ("asciidoc", &ASCIIDOC_COMMENT),
];

#[test]
fn test_json_round_trip() {
    for (_, comment) in COMMENTS {
        round_trip(Syntax::Json, comment);
    }
}

#[test]
fn test_yaml_round_trip() {
    for (_, comment) in COMMENTS {
        round_trip(Syntax::Yaml, comment);
    }
}

#[test]
fn test_xml_round_trip() {
    for (_, comment) in COMMENTS {
        round_trip(Syntax::Xml, comment);
    }
}

#[test]
fn test_close_tokens_never_appear_inside_bodies() {
    for (name, comment) in COMMENTS {
        let close = comment.step.close.trim();
        for syntax in [Syntax::Json, Syntax::Yaml, Syntax::Xml] {
            for step in steps() {
                let annotation = serialize_step(&step, syntax, comment).unwrap();
                let body = &annotation[..annotation.len() - close.len()];
                // line comments only close at the end of a line
                let closes_early = if comment.continuation.is_empty() {
                    body.contains(close)
                } else {
                    body.lines().any(|line| line.trim_end().ends_with(close))
                };
                assert!(!closes_early, "{name} {syntax}: {annotation}");
            }
        }
    }
}

#[test]
fn test_multiline_asciidoc_body_with_parentheses() {
    let step = Step::from_value(json!({ "find": "Save (draft)", "timeout": 500 })).unwrap();
    let annotation = serialize_step(&step, Syntax::Yaml, &ASCIIDOC_COMMENT).unwrap();
    assert_eq!(
        annotation,
        "// (step\n// find: \"Save (draft)\"\n// timeout: 500\n// )"
    );
    let found = read_annotations(&annotation, &ASCIIDOC_COMMENT);
    assert_eq!(
        Value::Object(found[0].parse().unwrap()),
        json!({ "find": "Save (draft)", "timeout": 500 })
    );
}

#[test]
fn test_round_trip_survives_indented_insertion() {
    let doc = "- Step one\n  - Click **Save**\n";
    for syntax in [Syntax::Json, Syntax::Yaml, Syntax::Xml] {
        let ops: Vec<_> = steps()
            .iter()
            .map(|step| UpdateOperation::after(20, serialize_step(step, syntax, &HTML_COMMENT).unwrap()))
            .collect();
        let result = apply(doc, &ops).unwrap();
        let parsed: Vec<Value> = read_annotations(&result, &HTML_COMMENT)
            .iter()
            .map(|a| Value::Object(a.parse().unwrap()))
            .collect();
        let expected: Vec<Value> = steps().iter().map(|s| Value::Object(step_form(s))).collect();
        assert_eq!(parsed, expected, "{syntax}");
    }
}
