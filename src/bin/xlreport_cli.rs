//! CLI tool for xlreport - renders a JSON report definition to XLSX
//!
//! Usage:
//!   xlreport_cli <report.json>                 # Write report.xlsx
//!   xlreport_cli <report.json> -o out.xlsx     # Write out.xlsx
//!   xlreport_cli --demo [-o out.xlsx]          # Render the built-in example report
//!   xlreport_cli <report.json> --dry-run       # Print the recorded cell writes as JSON (no -o)
//!
//! Set `RUST_LOG=debug` for per-sheet logging.

#![allow(clippy::exit)]

use std::env;
use std::fs;
use std::io::{self, Write};

use tracing_subscriber::EnvFilter;
use xlreport::export::XlsxWorkbook;
use xlreport::memory::MemoryWorkbook;
use xlreport::report::ReportDefinition;

const USAGE: &str = "Usage: xlreport_cli (<report.json> | --demo) [-o output.xlsx | --dry-run]";
const DEFAULT_OUTPUT: &str = "report.xlsx";

#[derive(Debug)]
struct Args {
    input: Option<String>,
    demo: bool,
    output: Option<String>,
    dry_run: bool,
}

/// Parse the arguments after the program name; `None` means print usage.
fn parse_args(raw: impl IntoIterator<Item = String>) -> Option<Args> {
    let mut args = Args {
        input: None,
        demo: false,
        output: None,
        dry_run: false,
    };
    let mut iter = raw.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-o" | "--output" => args.output = Some(iter.next()?),
            "--demo" => args.demo = true,
            "--dry-run" => args.dry_run = true,
            _ if arg.starts_with('-') => return None,
            _ if args.input.is_none() => args.input = Some(arg),
            _ => return None,
        }
    }
    if args.demo == args.input.is_some() {
        return None;
    }
    // A dry run writes no file.
    if args.dry_run && args.output.is_some() {
        return None;
    }
    Some(args)
}

fn fail(msg: &str) -> ! {
    eprintln!("{msg}");
    std::process::exit(1);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let Some(args) = parse_args(env::args().skip(1)) else {
        fail(USAGE);
    };

    // Load the report definition
    let definition = match &args.input {
        Some(path) => {
            let json = match fs::read_to_string(path) {
                Ok(j) => j,
                Err(e) => fail(&format!("Error reading {path}: {e}")),
            };
            ReportDefinition::from_json(&json)
        }
        None => ReportDefinition::demo(),
    };
    let definition = match definition {
        Ok(d) => d,
        Err(e) => fail(&format!("Error loading report: {e}")),
    };

    if args.dry_run {
        let mut workbook = MemoryWorkbook::new();
        if let Err(e) = definition.render(&mut workbook) {
            fail(&format!("Error rendering report: {e}"));
        }
        let json = match serde_json::to_string_pretty(&workbook) {
            Ok(j) => j,
            Err(e) => fail(&format!("Error serializing JSON: {e}")),
        };
        let mut stdout = io::stdout();
        if let Err(e) = writeln!(stdout, "{json}") {
            fail(&format!("Error writing output: {e}"));
        }
        return;
    }

    let mut workbook = XlsxWorkbook::new();
    if let Err(e) = definition.render(&mut workbook) {
        fail(&format!("Error rendering report: {e}"));
    }

    let output = args.output.as_deref().unwrap_or(DEFAULT_OUTPUT);
    if let Err(e) = workbook.save(output) {
        fail(&format!("Error writing {output}: {e}"));
    }
    eprintln!("Written: {output}");
}
