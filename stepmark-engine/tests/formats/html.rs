use crate::common::fixture;
use insta::assert_snapshot;
use stepmark_engine::{inject, FormatRegistry, InjectOptions, Syntax, TestSuite};

#[test]
fn test_html_yaml_suite_with_test_markers() {
    let suite = TestSuite::from_source("login.yaml", &fixture("login.yaml")).unwrap();
    let options = InjectOptions {
        syntax: Syntax::Yaml,
        context_lines: 0,
    };
    let report = inject(
        &FormatRegistry::with_defaults(),
        "site/LOGIN.HTML",
        &fixture("login.html"),
        &suite,
        &options,
    )
    .unwrap();

    assert_eq!(report.format, "html");
    assert!(report.unmatched.is_empty());
    assert!(report.insertions.iter().all(|i| i.context_before.is_empty()));
    assert_snapshot!(report.result, @r###"
<html>
<body>
  <!-- test
  testId: login
  description: Log in
  -->
  <p>Go to <a href="https://example.com/login">the login page</a>.</p>
  <!-- step goTo: "https://example.com/login" -->
  <p>Click <button type="submit">Sign in</button> to continue.</p>
  <!-- step click: Sign in -->
  <p>Type "admin" in the user field.</p>
  <!-- step type: admin -->
  <!-- test end -->
</body>
</html>
"###);
}
