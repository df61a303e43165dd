//! User-defined patterns appended after the built-ins

use serde_json::json;
use stepmark_engine::{
    inject, CustomPattern, FormatRegistry, InjectOptions, PatternError, TestSuite,
};

fn custom(name: &str, regex: &str, action: &str) -> CustomPattern {
    CustomPattern {
        name: name.to_string(),
        regex: vec![regex.to_string()],
        action: action.to_string(),
        value_group: 1,
        field: None,
    }
}

#[test]
fn test_custom_pattern_matches_and_bad_ones_are_skipped() {
    let defs = [
        custom("bad", r"(?<=wait )(\d+)", "wait"),
        custom("waitSeconds", r"(?i)wait (\d+) seconds", "wait"),
    ];
    let mut registry = FormatRegistry::with_defaults();
    let errors = registry.extend_patterns(
        "markdown",
        &defs.iter().map(|c| c.to_def().unwrap()).collect::<Vec<_>>(),
    );
    assert_eq!(errors.len(), 1);
    assert!(matches!(&errors[0], PatternError::InvalidRegex { name, .. } if name == "bad"));

    let suite = TestSuite::from_value(json!([{ "wait": "5" }])).unwrap();
    let report = inject(
        &registry,
        "wait.md",
        "Intro.\n\nWait 5 seconds for the build.\n",
        &suite,
        &InjectOptions::default(),
    )
    .unwrap();
    assert_eq!(
        report.result,
        "Intro.\n\nWait 5 seconds for the build.\n<!-- step {\"wait\":\"5\"} -->\n"
    );
}

#[test]
fn test_custom_pattern_conversion_errors() {
    let unknown_action = custom("x", "(a)", "teleport");
    assert!(matches!(
        unknown_action.to_def(),
        Err(PatternError::UnknownAction { .. })
    ));

    let mut unknown_field = custom("y", "(a)", "find");
    unknown_field.field = Some("colour".to_string());
    assert!(matches!(
        unknown_field.to_def(),
        Err(PatternError::UnknownField { .. })
    ));

    let mut missing_group = custom("z", "(a)", "find");
    missing_group.value_group = 3;
    let mut registry = FormatRegistry::with_defaults();
    let errors = registry.extend_patterns("markdown", &[missing_group.to_def().unwrap()]);
    assert!(matches!(&errors[..], [PatternError::MissingGroup { group: 3, .. }]));
}
