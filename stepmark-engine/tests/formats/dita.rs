use crate::common::{fixture, run_with};
use serde_json::json;
use stepmark_engine::Syntax;

#[test]
fn test_dita_processing_instructions_in_xml_syntax() {
    let report = run_with(
        "topics/login-task.dita",
        &fixture("login-task.dita"),
        json!([{ "click": "Log in" }, { "type": "admin" }]),
        Syntax::Xml,
    );

    assert_eq!(report.format, "dita");
    assert_eq!(report.existing_annotations, 0);
    let lines: Vec<_> = report.result.lines().collect();
    assert_eq!(
        lines[4],
        "      <step><cmd>Click <uicontrol>Log in</uicontrol>.</cmd></step>"
    );
    assert_eq!(lines[5], r#"      <?doc-detective step click="Log in" ?>"#);
    assert_eq!(lines[7], r#"      <?doc-detective step type="admin" ?>"#);
}

#[test]
fn test_plain_xml_files_resolve_to_dita() {
    let report = run_with(
        "topic.xml",
        "<p>Click <uicontrol>OK</uicontrol>.</p>\n",
        json!([{ "click": "OK" }]),
        Syntax::Json,
    );
    assert_eq!(
        report.result,
        "<p>Click <uicontrol>OK</uicontrol>.</p>\n<?doc-detective step {\"click\":\"OK\"} ?>\n"
    );
}
