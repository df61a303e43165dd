//! Shared helpers for engine integration tests.

use std::fs;
use std::path::PathBuf;
use stepmark_engine::{inject, FormatRegistry, InjectOptions, InjectReport, Syntax, TestSuite};

/// Read a file from `tests/fixtures`.
pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}

/// Inject a JSON suite with the default registry.
pub fn run(path: &str, source: &str, suite: serde_json::Value) -> InjectReport {
    run_with(path, source, suite, Syntax::Json)
}

pub fn run_with(
    path: &str,
    source: &str,
    suite: serde_json::Value,
    syntax: Syntax,
) -> InjectReport {
    let suite = TestSuite::from_value(suite).expect("valid suite");
    let options = InjectOptions {
        syntax,
        ..InjectOptions::default()
    };
    inject(&FormatRegistry::with_defaults(), path, source, &suite, &options)
        .expect("injection succeeds")
}
