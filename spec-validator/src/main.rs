// These Clippy lints are disabled because this is a CLI binary, not a library:
// - print_stdout/print_stderr: CLI tools are expected to print to stdout/stderr for user output.
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod logging;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use spec_validator::{OpenApiValidator, SearchConfig, ValidationReport, output, validate_openapi};

/// Validate the project's OpenAPI specification.
#[derive(Debug, Parser)]
#[command(name = "validate-openapi", version, about)]
struct Cli {
    /// Candidate path to search, in priority order (repeatable). Replaces the default list.
    #[arg(long = "candidate", value_name = "PATH")]
    candidates: Vec<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Human)]
    format: Format,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Human,
    Json,
}

impl Cli {
    fn search_config(&self) -> SearchConfig {
        if !self.candidates.is_empty() {
            return SearchConfig::with_candidates(self.candidates.clone());
        }
        let cwd = std::env::current_dir().unwrap_or_else(|e| {
            tracing::warn!("could not read the working directory ({e}); using '.'");
            PathBuf::from(".")
        });
        SearchConfig::default_for(&cwd)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("Error: {e}");
    }

    let search = cli.search_config();
    let report = ValidationReport::from(validate_openapi(&search, &OpenApiValidator));
    tracing::info!(exit_code = report.exit_code(), "validation finished");

    let mut stdout = io::stdout().lock();
    let written = match cli.format {
        Format::Human => output::write_human(&report, &mut stdout),
        Format::Json => output::write_json(&report, &mut stdout),
    };
    if let Err(e) = written {
        eprintln!("Error: failed to write report: {e}");
    }

    ExitCode::from(report.exit_code())
}
