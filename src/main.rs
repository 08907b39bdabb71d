use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use uritemplate::config::suite::{load_suite_file, run_suite, Expected, SuiteReport};
use uritemplate::config::variables::{load_variables_file, merge_assignments};
use uritemplate::{Partial, Template, Variables};

fn cli() -> Command {
    Command::new("uritemplate")
        .about("Parse and expand RFC 6570 URI templates")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging on stderr"),
        )
        .subcommand(
            Command::new("expand")
                .about("Expand a template with variables")
                .arg(Arg::new("template").required(true).value_name("TEMPLATE"))
                .arg(
                    Arg::new("vars")
                        .short('f')
                        .long("vars")
                        .value_name("FILE")
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("Path to a YAML or JSON file containing variables"),
                )
                .arg(
                    Arg::new("set")
                        .short('s')
                        .long("set")
                        .value_name("NAME=VALUE")
                        .action(ArgAction::Append)
                        .help("Set a string variable, overriding the file"),
                )
                .arg(
                    Arg::new("base_url")
                        .short('b')
                        .long("base-url")
                        .value_name("URL")
                        .help("Literal prefix placed before the template"),
                ),
        )
        .subcommand(
            Command::new("parse")
                .about("Show the parsed structure of a template")
                .arg(Arg::new("template").required(true).value_name("TEMPLATE")),
        )
        .subcommand(
            Command::new("suite")
                .about("Run conformance suite files")
                .arg(
                    Arg::new("files")
                        .required(true)
                        .num_args(1..)
                        .value_name("FILE")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn expand(matches: &ArgMatches) -> Result<()> {
    let raw = matches
        .get_one::<String>("template")
        .context("missing template")?;
    let mut template: Template = raw
        .parse()
        .with_context(|| format!("Invalid template: {}", raw))?;
    if let Some(base_url) = matches.get_one::<String>("base_url") {
        template = template.with_base_url(base_url);
    }

    let file_vars = match matches.get_one::<PathBuf>("vars") {
        Some(path) => load_variables_file(path)?,
        None => Variables::new(),
    };
    let assignments: Vec<String> = matches
        .get_many::<String>("set")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let values = merge_assignments(file_vars, &assignments)?;

    for name in template.variable_names() {
        if !values.contains_key(name) {
            tracing::debug!(variable = name, "variable not bound, expands to nothing");
        }
    }

    println!("{}", template.with_values(values).render());
    Ok(())
}

fn show(matches: &ArgMatches) -> Result<()> {
    let raw = matches
        .get_one::<String>("template")
        .context("missing template")?;
    let template: Template = raw
        .parse()
        .with_context(|| format!("Invalid template: {}", raw))?;

    println!("{}", template.source_form());
    for (position, partial) in template.partials().iter().enumerate() {
        let kind = match partial {
            Partial::Literal(_) => "literal",
            Partial::Expression(_) => "expression",
        };
        println!("{:>3} {:<10} {}", position, kind, partial);
    }
    Ok(())
}

fn suite(matches: &ArgMatches) -> Result<bool> {
    let mut all_passed = true;
    for path in matches.get_many::<PathBuf>("files").into_iter().flatten() {
        let report = run_suite(&load_suite_file(path)?);
        print_report(path, &report);
        all_passed &= report.is_success();
    }
    Ok(all_passed)
}

fn print_report(path: &Path, report: &SuiteReport) {
    for failure in &report.failures {
        let expected = match &failure.expected {
            Expected::Exact(s) => s.clone(),
            Expected::AnyOf(options) => options.join(" | "),
            Expected::Error(_) => "<error>".to_string(),
        };
        let actual = match &failure.actual {
            Ok(s) => s.clone(),
            Err(e) => format!("<error: {}>", e),
        };
        println!(
            "FAIL [{}] {}\n  expected: {}\n  actual:   {}",
            failure.group, failure.template, expected, actual
        );
    }
    println!(
        "{}: {}/{} passed",
        path.display(),
        report.passed,
        report.total()
    );
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_logging(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("expand", sub)) => expand(sub),
        Some(("parse", sub)) => show(sub),
        Some(("suite", sub)) => {
            if !suite(sub)? {
                std::process::exit(1);
            }
            Ok(())
        }
        _ => unreachable!("subcommand is required"),
    }
}
