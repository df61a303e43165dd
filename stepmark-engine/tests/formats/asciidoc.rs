use crate::common::{fixture, run};
use serde_json::json;
use stepmark_engine::{read_annotations, Action, AnnotationKind, FormatRegistry};

#[test]
fn test_asciidoc_line_comments() {
    let source = fixture("deploy.adoc");
    let report = run(
        "deploy.adoc",
        &source,
        json!({
            "testId": "deploy",
            "steps": [
                { "goTo": "https://console.example.com" },
                { "click": "Deploy" },
                { "type": "Ctrl+S" },
                { "runShell": "./deploy.sh --prod" },
                { "find": "Rollback" }
            ]
        }),
    );

    assert_eq!(report.format, "asciidoc");
    assert_eq!(
        report.result,
        "= Deploying\n\
         \n\
         // (test {\"testId\":\"deploy\"})\n\
         Open https://console.example.com[the console].\n\
         // (step {\"goTo\":\"https://console.example.com\"})\n\
         \n\
         . Click btn:[Deploy].\n\
         // (step {\"click\":\"Deploy\"})\n\
         . Press kbd:[Ctrl+S] to save.\n\
         // (step {\"type\":\"Ctrl+S\"})\n\
         \n\
         [source,bash]\n\
         ----\n\
         ./deploy.sh --prod\n\
         ----\n\
         // (step {\"runShell\":\"./deploy.sh --prod\"})\n\
         // (step {\"find\":\"Rollback\"})\n\
         // (test end)\n"
    );

    let missing = &report.unmatched[0].steps[0];
    assert_eq!((missing.step_index, missing.action, missing.suggested_line), (4, Action::Find, 11));

    let registry = FormatRegistry::with_defaults();
    let comment = registry.resolve_format("deploy.adoc").comment_syntax;
    let kinds: Vec<_> = read_annotations(&report.result, comment)
        .into_iter()
        .map(|a| a.kind)
        .collect();
    assert_eq!(kinds.first(), Some(&AnnotationKind::Test));
    assert_eq!(kinds.last(), Some(&AnnotationKind::TestEnd));
    assert_eq!(kinds.len(), 7);
}
