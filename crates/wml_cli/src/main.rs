//! wmlp: the WML parser command-line front end.
//!
//! Usage:
//!   wmlp [options] [file|dir...]
//!
//! Parses every document, reports diagnostics and optionally dumps the
//! token stream, the document tree or the refined key values.

mod input;
mod report;

use clap::Parser as ClapParser;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use wml_core::text::LineMap;
use wml_diagnostics::Diagnostic;
use wml_options::{ParserOptions, WmlConfig};
use wml_parser::Parser;
use wml_values::KeyText;

use crate::input::InputError;
use crate::report::{format_error, format_line, format_pretty, stderr_is_terminal, JsonDiagnostic};

const CONFIG_FILE: &str = "wmlconfig.json";

#[derive(ClapParser, Debug)]
#[command(name = "wmlp", about = "wmlp - a fast WML parser and checker", version)]
struct Cli {
    /// WML files or directories to parse.
    #[arg(value_name = "PATH")]
    files: Vec<PathBuf>,

    /// Path to wmlconfig.json.
    #[arg(short = 'p', long = "project")]
    project: Option<PathBuf>,

    /// Print the document tree of each file.
    #[arg(long)]
    tree: bool,

    /// Print the token stream of each file.
    #[arg(long)]
    tokens: bool,

    /// Print every key with its refined value.
    #[arg(long)]
    values: bool,

    /// Write diagnostics to stdout as JSON.
    #[arg(long, conflicts_with = "pretty")]
    json: bool,

    /// Render diagnostics with source excerpts.
    #[arg(long)]
    pretty: bool,

    /// Override the nesting limit.
    #[arg(long = "max-depth", value_name = "N")]
    max_depth: Option<u32>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Everything produced for one input document.
struct FileReport {
    path: String,
    text: String,
    line_map: LineMap,
    diagnostics: Vec<Diagnostic>,
    /// Requested dumps, already rendered.
    output: String,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let exit_code = run(&cli);
    process::exit(exit_code);
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> i32 {
    let start = Instant::now();
    let use_color = !cli.json && stderr_is_terminal();

    let (config, base) = match load_config(cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{}", format_error(&e.to_string(), use_color));
            return 2;
        }
    };

    let mut options = config.parser_options.clone();
    if let Some(depth) = cli.max_depth {
        if depth == 0 {
            eprintln!("{}", format_error("--max-depth must be at least 1", use_color));
            return 2;
        }
        options.max_depth = depth;
    }

    let roots = if cli.files.is_empty() {
        config.include_paths(&base)
    } else {
        cli.files.clone()
    };
    let files = match input::collect_files(&roots, &config) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("{}", format_error(&e.to_string(), use_color));
            return 2;
        }
    };
    if files.is_empty() {
        eprintln!("{}", format_error("No input files found.", use_color));
        return 2;
    }

    // One independent parser per document; collect keeps input order.
    let reports: Vec<Result<FileReport, InputError>> =
        files.par_iter().map(|path| process_file(path, cli, &options)).collect();

    let mut io_failed = false;
    let mut error_count = 0usize;
    let mut json = Vec::new();
    for report in &reports {
        let report = match report {
            Ok(report) => report,
            Err(e) => {
                eprintln!("{}", format_error(&e.to_string(), use_color));
                io_failed = true;
                continue;
            }
        };
        print!("{}", report.output);
        error_count += report.diagnostics.iter().filter(|d| d.is_error()).count();
        for diag in &report.diagnostics {
            if cli.json {
                json.push(JsonDiagnostic::new(&report.path, &report.line_map, diag));
            } else if cli.pretty {
                eprintln!("{}", format_pretty(&report.path, &report.text, diag));
            } else {
                eprintln!("{}", format_line(&report.path, &report.line_map, diag, use_color));
            }
        }
    }

    if cli.json {
        match serde_json::to_string_pretty(&json) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("{}", format_error(&e.to_string(), use_color));
                return 2;
            }
        }
    }

    info!(
        files = reports.len(),
        errors = error_count,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "done"
    );

    if io_failed {
        return 2;
    }
    if error_count > 0 {
        if !cli.json {
            eprintln!(
                "\nFound {} error{} in {} file{}.",
                error_count,
                if error_count == 1 { "" } else { "s" },
                reports.len(),
                if reports.len() == 1 { "" } else { "s" }
            );
        }
        return 1;
    }
    0
}

/// The configuration and the directory its `include` entries are relative
/// to. An explicit `--project` must exist; `wmlconfig.json` in the working
/// directory is picked up when present.
fn load_config(cli: &Cli) -> Result<(WmlConfig, PathBuf), wml_options::ConfigError> {
    let path = match &cli.project {
        Some(path) => Some(path.clone()),
        None => Some(PathBuf::from(CONFIG_FILE)).filter(|p| p.exists()),
    };
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration");
            let config = wml_options::parse_config_file(&path)?;
            let base = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            Ok((config, base))
        }
        None => Ok((WmlConfig::default(), PathBuf::from("."))),
    }
}

fn process_file(path: &Path, cli: &Cli, options: &ParserOptions) -> Result<FileReport, InputError> {
    let text = input::read_source(path)?;
    let name = path.display().to_string();
    let result = Parser::new(&name, &text).with_options(options.clone()).parse();
    let document = &result.document;

    let mut output = String::new();
    if cli.tokens {
        output.push_str(&wml_printer::print_tokens(&name, &text));
    }
    if cli.tree {
        output.push_str(&wml_printer::print_document(document));
    }
    if cli.values {
        for (id, node) in document.nodes() {
            if node.as_key().is_none() {
                continue;
            }
            if let Ok(key) = KeyText::from_key(document, id) {
                let position = document.line_map().line_and_column_of(key.range.pos);
                output.push_str(&format!("{}:{}: {} = {:?}\n", name, position, key.name, key.refine()));
            }
        }
    }

    Ok(FileReport {
        line_map: document.line_map().clone(),
        diagnostics: result.diagnostics.into_diagnostics(),
        path: name,
        text,
        output,
    })
}
