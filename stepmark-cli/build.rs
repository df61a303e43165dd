use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of Syntax::ALL in stepmark-engine
// Build scripts can't depend on the crate they build, so the list is repeated here
const SYNTAXES: &[&str] = &["json", "yaml", "xml"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("stepmark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Place test-step annotations next to the documentation content they describe")
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("inject")
                .about("Inject test steps into a document")
                .arg(Arg::new("spec").required(true).index(1).value_hint(ValueHint::FilePath))
                .arg(Arg::new("source").required(true).index(2).value_hint(ValueHint::FilePath))
                .arg(Arg::new("apply").long("apply").action(ArgAction::SetTrue))
                .arg(
                    Arg::new("syntax")
                        .long("syntax")
                        .value_parser(clap::builder::PossibleValuesParser::new(SYNTAXES)),
                )
                .arg(Arg::new("context").long("context").value_name("N"))
                .arg(Arg::new("diff").long("diff").action(ArgAction::SetTrue))
                .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("scan")
                .about("List the content matches found in a document")
                .arg(Arg::new("source").required(true).index(1).value_hint(ValueHint::FilePath))
                .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
        )
        .subcommand(Command::new("formats").about("List supported formats"));

    generate_to(Bash, &mut cmd, "stepmark", &outdir)?;
    generate_to(Zsh, &mut cmd, "stepmark", &outdir)?;
    generate_to(Fish, &mut cmd, "stepmark", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
