//! varsub CLI
//!
//! Usage:
//!   varsub [OPTIONS] <TEMPLATE>
//!
//! Options:
//!   --vars <FILE>            Variables file
//!   -s, --separator <SEP>    Record separator (default: newline)
//!   -a, --assignment <OP>    Assignment operator (default: =)
//!   --set <KEY=VALUE>        Inline variable, may be repeated
//!   -c, --config <FILE>      Configuration file (TOML format)
//!   --lenient                Drop incomplete pairs instead of failing
//!   --no-stdin               Never read variables from stdin
//!   --list                   Print the template's placeholder keys
//!   -v, --verbose            Increase log verbosity
//!   -h, --help               Print help

use std::collections::HashSet;
use std::fmt::Display;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use tracing::{debug, info};

use varsub::config::decode_escapes;
use varsub::sources::{read_all, read_file};
use varsub::{
    parse_variables, renderer, Config, Delimiters, Error, Sources, TrailingPair,
};

#[derive(Parser)]
#[command(name = "varsub")]
#[command(about = "Substitute {{ key }} placeholders in a template with key=value variables")]
struct Cli {
    /// Template file
    template: Option<PathBuf>,

    /// Variables file
    #[arg(long)]
    vars: Option<PathBuf>,

    /// Record separator between assignments (\n, \t, \r and \\ are decoded)
    #[arg(short, long)]
    separator: Option<String>,

    /// Assignment operator between key and value (escapes as for --separator)
    #[arg(short, long)]
    assignment: Option<String>,

    /// Inline variable in the configured syntax; later entries win
    #[arg(long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,

    /// Configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Drop incomplete pairs instead of failing
    #[arg(long)]
    lenient: bool,

    /// Never read variables from stdin
    #[arg(long)]
    no_stdin: bool,

    /// Print the template's placeholder keys, one per line, instead of rendering
    #[arg(long)]
    list: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    varsub::logging::init_tracing(cli.verbose);

    let config = load_config(&cli).unwrap_or_else(|e| fail(e));

    // Template first: nothing is parsed without one
    let (template_path, template) = load_template(&cli).unwrap_or_else(|e| fail(e));
    let template_name = template_path.display().to_string();

    if cli.list {
        let keys = renderer::placeholders(&template)
            .unwrap_or_else(|e| fail_report(e.format(&template, &template_name)));
        let mut seen = HashSet::new();
        let mut out = String::new();
        for key in keys.into_iter().filter(|k| seen.insert(*k)) {
            out.push_str(key);
            out.push('\n');
        }
        write_stdout(&out);
        return;
    }

    let sources = load_sources(&cli).unwrap_or_else(|e| fail(e));
    let vars = sources.assemble(&config.delimiters);

    let store = parse_variables(&vars, &config)
        .unwrap_or_else(|e| fail_report(e.format(&vars, "<variables>")));
    info!(variables = store.len(), "loaded variables");

    let output = renderer::render(&store, &template)
        .unwrap_or_else(|e| fail_report(e.format(&template, &template_name)));
    write_stdout(&output);
}

/// Merge defaults, the config file and command-line flags
fn load_config(cli: &Cli) -> Result<Config, Error> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if cli.separator.is_some() || cli.assignment.is_some() {
        let separator = cli
            .separator
            .as_deref()
            .map(decode_escapes)
            .unwrap_or_else(|| config.delimiters.separator().to_string());
        let assignment = cli
            .assignment
            .as_deref()
            .map(decode_escapes)
            .unwrap_or_else(|| config.delimiters.assignment().to_string());
        config = config.with_delimiters(Delimiters::new(separator, assignment)?);
    }
    if cli.lenient {
        config = config.with_trailing(TrailingPair::Lenient);
    }

    debug!(
        separator = ?config.delimiters.separator(),
        assignment = ?config.delimiters.assignment(),
        trailing = ?config.trailing,
        "configuration"
    );
    Ok(config)
}

fn load_template(cli: &Cli) -> Result<(PathBuf, String), Error> {
    let path = cli.template.clone().ok_or(Error::MissingTemplate)?;
    let template = read_file(&path)?;
    if template.is_empty() {
        return Err(Error::MissingTemplate);
    }
    Ok((path, template))
}

fn load_sources(cli: &Cli) -> Result<Sources, Error> {
    let mut sources = Sources::new();

    if let Some(path) = &cli.vars {
        sources = sources.with_vars_file(read_file(path)?);
    }

    let stdin = io::stdin();
    if !cli.no_stdin && !stdin.is_terminal() {
        sources = sources.with_stdin(read_all(stdin.lock(), "<stdin>")?);
    }

    for record in &cli.set {
        sources = sources.with_override(record.clone());
    }
    Ok(sources)
}

fn write_stdout(text: &str) {
    let mut stdout = io::stdout().lock();
    if let Err(e) = stdout.write_all(text.as_bytes()).and_then(|_| stdout.flush()) {
        fail(format!("writing output: {}", e));
    }
}

fn fail(error: impl Display) -> ! {
    eprintln!("Error: {}", error);
    std::process::exit(1);
}

/// Print a pre-formatted diagnostic report and exit
fn fail_report(report: String) -> ! {
    eprint!("{}", report);
    std::process::exit(1);
}
