//! Text and JSON output for the CLI.
//!
//! Documents and reports go to stdout; summaries, warnings and errors go to
//! stderr so a preview can be redirected straight into a file.

use serde::Serialize;
use stepmark_engine::{ContentMatch, FormatRegistry, InjectReport};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_INJECTION_FAILED: i32 = 1;
pub const EXIT_USAGE: i32 = 2;

/// A command that could not finish, with the exit code it maps to.
#[derive(Debug)]
pub struct Failure {
    pub message: String,
    pub code: i32,
}

impl Failure {
    pub fn usage(message: String) -> Self {
        Failure {
            message,
            code: EXIT_USAGE,
        }
    }

    pub fn injection(message: String) -> Self {
        Failure {
            message,
            code: EXIT_INJECTION_FAILED,
        }
    }

    /// Print the failure and return its exit code.
    pub fn report(self, json: bool) -> i32 {
        if json {
            print_json(&ErrorEnvelope {
                success: false,
                error: &self.message,
                exit_code: self.code,
            });
        } else {
            eprintln!("Error: {}", self.message);
        }
        self.code
    }
}

/// Result of the inject command.
pub struct InjectOutcome {
    pub source_path: String,
    pub applied: bool,
    pub report: InjectReport,
    pub pattern_errors: Vec<String>,
}

/// Result of the scan command.
pub struct ScanOutcome {
    pub format: String,
    pub matches: Vec<ContentMatch>,
    pub pattern_errors: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InjectEnvelope<'a> {
    success: bool,
    applied: bool,
    #[serde(flatten)]
    report: &'a InjectReport,
    pattern_errors: &'a [String],
    exit_code: i32,
}

impl<'a> InjectEnvelope<'a> {
    pub fn new(outcome: &'a InjectOutcome) -> Self {
        InjectEnvelope {
            success: true,
            applied: outcome.applied,
            report: &outcome.report,
            pattern_errors: &outcome.pattern_errors,
            exit_code: EXIT_SUCCESS,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanEnvelope<'a> {
    success: bool,
    format: &'a str,
    matches: &'a [ContentMatch],
    pattern_errors: &'a [String],
    exit_code: i32,
}

impl<'a> ScanEnvelope<'a> {
    pub fn new(outcome: &'a ScanOutcome) -> Self {
        ScanEnvelope {
            success: true,
            format: &outcome.format,
            matches: &outcome.matches,
            pattern_errors: &outcome.pattern_errors,
            exit_code: EXIT_SUCCESS,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorEnvelope<'a> {
    success: bool,
    error: &'a str,
    exit_code: i32,
}

pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("Error: cannot encode report: {err}"),
    }
}

/// Preview or apply summary, with the document on stdout in preview mode.
pub fn print_text(outcome: &InjectOutcome) {
    let report = &outcome.report;
    if !outcome.applied {
        print!("{}", report.result);
    }
    print_summary(outcome);
}

/// Planned insertions as diff-style hunks.
pub fn print_diff(outcome: &InjectOutcome) {
    for insertion in &outcome.report.insertions {
        println!("@@ line {} @@", insertion.line);
        for line in &insertion.context_before {
            println!("  {line}");
        }
        for line in insertion.content.lines() {
            println!("+ {line}");
        }
        for line in &insertion.context_after {
            println!("  {line}");
        }
    }
    print_summary(outcome);
}

fn print_summary(outcome: &InjectOutcome) {
    let report = &outcome.report;
    for error in &outcome.pattern_errors {
        eprintln!("Warning: {error}");
    }
    if !report.unmatched.is_empty() {
        eprintln!("Unmatched steps:");
        for test in &report.unmatched {
            let test_id = test.test_id.as_deref().unwrap_or("(unnamed test)");
            for step in &test.steps {
                eprintln!(
                    "  {test_id}: step {} ({}) placed near line {}",
                    step.step_index + 1,
                    step.action,
                    step.suggested_line
                );
            }
        }
    }

    let matched = format!("{} of {} steps matched", report.matched_steps, report.step_count);
    if outcome.applied {
        eprintln!(
            "Injected {} annotations into {} ({matched}, {} lines added)",
            report.annotations_added, outcome.source_path, report.lines_added
        );
    } else {
        eprintln!(
            "Preview: {} annotations would be injected ({matched})",
            report.annotations_added
        );
        eprintln!("Run with --apply to write changes to {}", outcome.source_path);
    }
}

pub fn print_matches(outcome: &ScanOutcome) {
    for error in &outcome.pattern_errors {
        eprintln!("Warning: {error}");
    }
    for m in &outcome.matches {
        let actions: Vec<_> = m.actions.iter().map(|a| a.as_str()).collect();
        println!(
            "{:>5}  {:<20} {:<12} {}",
            m.line,
            m.pattern,
            actions.join(","),
            m.value().unwrap_or(&m.text)
        );
    }
    eprintln!("{} matches ({})", outcome.matches.len(), outcome.format);
}

pub fn print_formats(registry: &FormatRegistry) {
    for name in registry.list_formats() {
        let Some(format) = registry.get(&name) else {
            continue;
        };
        let extensions: Vec<_> = format
            .file_extensions()
            .iter()
            .map(|ext| format!(".{ext}"))
            .collect();
        let comment = format.comment_syntax();
        println!(
            "{name:<10} {:<28} {}...{}",
            extensions.join(", "),
            comment.step.open,
            comment.step.close
        );
    }
}
