// Command-line interface for stepmark
//
// This binary overlays test-step annotations onto documentation files, next to the content each
// step describes. All matching and rendering lives in stepmark-engine; this crate reads files,
// loads configuration, prints reports and, only when asked to, writes the result back.
//
// Usage:
//  stepmark <spec> <source> [--apply] [--syntax S] [--context N] [--json]         - Inject steps (default)
//  stepmark inject <spec> <source> [--apply] [--syntax S] [--context N] [--json]  - Same as above (explicit)
//  stepmark scan <source> [--json]                                                - List candidate content matches
//  stepmark formats                                                               - List supported formats
//
// Preview is the default: the annotated document is printed and the source is left untouched.
//
// Exit codes:
//  0  success (unmatched steps are reported, not failures)
//  1  injection failed (mutation error, write error)
//  2  usage or input error (missing file, unreadable spec, bad configuration)

mod report;

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use report::Failure;
use std::fs;
use stepmark_config::{Loader, StepmarkConfig};
use stepmark_engine::{inject, scan, FormatRegistry, InjectOptions, Syntax, TestSuite};
use tracing_subscriber::EnvFilter;

/// Looked up in the working directory when no `--config` is given.
const LOCAL_CONFIG: &str = "stepmark.toml";

const SUBCOMMANDS: &[&str] = &["inject", "scan", "formats", "help"];

fn build_cli() -> Command {
    Command::new("stepmark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Place test-step annotations next to the documentation content they describe")
        .long_about(
            "stepmark matches a list of test steps against a documentation file and inserts\n\
            each step as an inline annotation next to the content it describes.\n\n\
            Commands:\n  \
            - inject:  Place steps into a document (default command)\n  \
            - scan:    Show the content the document offers for matching\n  \
            - formats: List supported formats and their annotation syntax\n\n\
            Examples:\n  \
            stepmark steps.json guide.md                  # Preview the annotated guide\n  \
            stepmark steps.yaml guide.md --apply          # Write annotations into guide.md\n  \
            stepmark steps.json page.html --syntax yaml   # YAML annotation bodies\n  \
            stepmark scan guide.md --json                 # Candidate matches as JSON",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a stepmark.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log matching decisions to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("inject")
                .about("Inject test steps into a document (default command)")
                .long_about(
                    "Match each step against the document's content and insert it as an\n\
                    annotation on the line after its match. Steps that match nothing are\n\
                    placed after the previous match (or at the top of the document) and\n\
                    reported as unmatched.\n\n\
                    The spec file is YAML for .yaml/.yml paths and JSON otherwise. It holds\n\
                    either {\"tests\": [...]}, a single {\"steps\": [...]} test, or a bare step array.\n\n\
                    Examples:\n  \
                    stepmark inject steps.json guide.md            # Preview (stdout)\n  \
                    stepmark inject steps.json guide.md --apply    # Modify guide.md\n  \
                    stepmark steps.json guide.md --json            # Machine-readable report",
                )
                .arg(
                    Arg::new("spec")
                        .help("Test spec file (JSON or YAML)")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("source")
                        .help("Documentation file to annotate")
                        .required(true)
                        .index(2)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("apply")
                        .long("apply")
                        .help("Write the annotated document back to the source file")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("syntax")
                        .long("syntax")
                        .help("Annotation body syntax (overrides inject.syntax)")
                        .value_parser(clap::builder::PossibleValuesParser::new(Syntax::ALL))
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("context")
                        .long("context")
                        .value_name("N")
                        .help("Context lines around each planned insertion (overrides inject.context_lines)")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    Arg::new("diff")
                        .long("diff")
                        .help("Show planned insertions with context instead of the whole document")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("json"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print a JSON report instead of text")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("scan")
                .about("List the content matches found in a document")
                .arg(
                    Arg::new("source")
                        .help("Documentation file to scan")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print matches as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("formats")
                .about("List supported formats, their extensions and annotation syntax"),
        )
}

/// Parse arguments, treating a leading non-subcommand argument as `inject`.
fn parse_args(args: Vec<String>) -> ArgMatches {
    let cli = build_cli();
    match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            if args.len() > 1 && !args[1].starts_with('-') && !SUBCOMMANDS.contains(&args[1].as_str()) {
                let mut new_args = vec![args[0].clone(), "inject".to_string()];
                new_args.extend_from_slice(&args[1..]);
                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let matches = parse_args(std::env::args().collect());
    init_tracing(matches.get_flag("verbose"));

    let config_path = matches.get_one::<String>("config").map(|s| s.as_str());
    let code = match matches.subcommand() {
        Some(("inject", sub_matches)) => handle_inject_command(sub_matches, config_path),
        Some(("scan", sub_matches)) => handle_scan_command(sub_matches, config_path),
        Some(("formats", _)) => handle_formats_command(config_path),
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            report::EXIT_USAGE
        }
    };
    std::process::exit(code);
}

/// Handle the inject command
fn handle_inject_command(matches: &ArgMatches, config_path: Option<&str>) -> i32 {
    let json = matches.get_flag("json");
    match run_inject(matches, config_path) {
        Ok(outcome) => {
            if json {
                report::print_json(&report::InjectEnvelope::new(&outcome));
            } else if matches.get_flag("diff") {
                report::print_diff(&outcome);
            } else {
                report::print_text(&outcome);
            }
            report::EXIT_SUCCESS
        }
        Err(failure) => failure.report(json),
    }
}

fn run_inject(
    matches: &ArgMatches,
    config_path: Option<&str>,
) -> Result<report::InjectOutcome, Failure> {
    let spec_path = required(matches, "spec")?;
    let source_path = required(matches, "source")?;
    let apply = matches.get_flag("apply");

    let config = load_cli_config(
        config_path,
        matches.get_one::<String>("syntax").map(|s| s.as_str()),
        matches.get_one::<u32>("context").copied(),
    )?;

    let spec = read_file(spec_path, "spec")?;
    let source = read_file(source_path, "source")?;
    let suite = TestSuite::from_source(spec_path, &spec)
        .map_err(|e| Failure::usage(format!("Invalid spec '{spec_path}': {e}")))?;

    let (registry, pattern_errors) = build_registry(&config);
    let options = InjectOptions::from(&config.inject);
    let report = inject(&registry, source_path, &source, &suite, &options)
        .map_err(|e| Failure::injection(format!("Injection failed: {e}")))?;

    if apply && report.annotations_added > 0 {
        fs::write(source_path, &report.result)
            .map_err(|e| Failure::injection(format!("Error writing file '{source_path}': {e}")))?;
        tracing::info!(path = source_path, annotations = report.annotations_added, "source updated");
    }

    Ok(report::InjectOutcome {
        source_path: source_path.to_string(),
        applied: apply,
        report,
        pattern_errors,
    })
}

/// Handle the scan command
fn handle_scan_command(matches: &ArgMatches, config_path: Option<&str>) -> i32 {
    let json = matches.get_flag("json");
    match run_scan(matches, config_path) {
        Ok(outcome) => {
            if json {
                report::print_json(&report::ScanEnvelope::new(&outcome));
            } else {
                report::print_matches(&outcome);
            }
            report::EXIT_SUCCESS
        }
        Err(failure) => failure.report(json),
    }
}

fn run_scan(
    matches: &ArgMatches,
    config_path: Option<&str>,
) -> Result<report::ScanOutcome, Failure> {
    let source_path = required(matches, "source")?;
    let config = load_cli_config(config_path, None, None)?;
    let source = read_file(source_path, "source")?;

    let (registry, pattern_errors) = build_registry(&config);
    let format = registry.resolve_format(source_path);
    Ok(report::ScanOutcome {
        format: format.name.to_string(),
        matches: scan(&source, format.patterns),
        pattern_errors,
    })
}

/// Handle the formats command
fn handle_formats_command(config_path: Option<&str>) -> i32 {
    match load_cli_config(config_path, None, None) {
        Ok(config) => {
            let (registry, _) = build_registry(&config);
            report::print_formats(&registry);
            report::EXIT_SUCCESS
        }
        Err(failure) => failure.report(false),
    }
}

fn load_cli_config(
    explicit_path: Option<&str>,
    syntax: Option<&str>,
    context_lines: Option<u32>,
) -> Result<StepmarkConfig, Failure> {
    let mut loader = match explicit_path {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file(LOCAL_CONFIG),
    };

    if let Some(syntax) = syntax {
        loader = loader
            .set_override("inject.syntax", syntax)
            .map_err(config_failure)?;
    }
    if let Some(lines) = context_lines {
        loader = loader
            .set_override("inject.context_lines", i64::from(lines))
            .map_err(config_failure)?;
    }

    loader.build().map_err(config_failure)
}

fn config_failure(err: impl std::fmt::Display) -> Failure {
    Failure::usage(format!("Failed to load configuration: {err}"))
}

/// Default formats plus configured custom patterns. Unusable patterns are
/// logged and returned for the report.
fn build_registry(config: &StepmarkConfig) -> (FormatRegistry, Vec<String>) {
    let mut registry = FormatRegistry::with_defaults();
    let errors = config
        .apply_patterns(&mut registry)
        .into_iter()
        .map(|err| {
            tracing::warn!(pattern = err.pattern_name(), error = %err, "custom pattern skipped");
            err.to_string()
        })
        .collect();
    (registry, errors)
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, Failure> {
    matches
        .get_one::<String>(name)
        .map(|s| s.as_str())
        .ok_or_else(|| Failure::usage(format!("Missing required argument <{name}>")))
}

fn read_file(path: &str, what: &str) -> Result<String, Failure> {
    fs::read_to_string(path).map_err(|e| Failure::usage(format!("Error reading {what} file '{path}': {e}")))
}
