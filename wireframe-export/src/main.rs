// These Clippy lints are disabled because this is a CLI binary, not a library:
// - print_stdout/print_stderr: CLI tools are expected to print to stdout/stderr for user output.
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod logging;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use wireframe_export::{
    BackendKind, DEFAULT_PATTERN, DEFAULT_WIDTH, ExportConfig, ExportError, default_project_root,
    load_backend, run, write_error,
};

/// Export low-fidelity SVG wireframes to PNG.
#[derive(Debug, Parser)]
#[command(name = "export-wireframes", version, about)]
struct Cli {
    /// Project root holding `design/wireframes` (default: the parent of the directory holding this executable).
    #[arg(long, value_name = "DIR")]
    project_root: Option<PathBuf>,

    /// Override the wireframe source directory.
    #[arg(long, value_name = "DIR")]
    source: Option<PathBuf>,

    /// Override the PNG output directory.
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// File name glob selecting wireframes in the source directory.
    #[arg(long, default_value = DEFAULT_PATTERN)]
    pattern: String,

    /// Output width in pixels; height follows the aspect ratio.
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: u32,

    /// Rasterization backend.
    #[arg(long, value_enum, default_value_t = Backend::Resvg)]
    backend: Backend,

    /// Path to the external rasterizer program (rsvg-convert backend only).
    #[arg(long, value_name = "PATH")]
    program: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Backend {
    Resvg,
    RsvgConvert,
}

impl From<Backend> for BackendKind {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::Resvg => Self::Resvg,
            Backend::RsvgConvert => Self::RsvgConvert,
        }
    }
}

impl Cli {
    fn export_config(&self) -> Result<ExportConfig, ExportError> {
        let root = match &self.project_root {
            Some(root) => root.clone(),
            None => default_project_root()?,
        };
        let mut config = ExportConfig::for_project_root(&root);
        if let Some(source) = &self.source {
            config.source_dir.clone_from(source);
        }
        if let Some(output) = &self.output {
            config.output_dir.clone_from(output);
        }
        config.pattern.clone_from(&self.pattern);
        config.width = self.width;
        Ok(config)
    }
}

fn fail(err: &ExportError, out: &mut dyn Write) -> ExitCode {
    tracing::debug!(error = %err, "export aborted");
    if let Err(write_err) = write_error(err, std::env::consts::OS, out) {
        eprintln!("Error: {err} ({write_err})");
    }
    ExitCode::from(err.exit_code())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("Error: {e}");
    }

    let mut stdout = io::stdout().lock();
    let config = match cli.export_config() {
        Ok(config) => config,
        Err(err) => return fail(&err, &mut stdout),
    };
    tracing::debug!(
        source = %config.source_dir.display(),
        output = %config.output_dir.display(),
        "resolved export directories"
    );

    let kind = BackendKind::from(cli.backend);
    let program = cli.program.as_deref();

    match run(&config, || load_backend(kind, program), &mut stdout) {
        Ok(summary) => {
            tracing::info!(exported = summary.exported.len(), "export finished");
            ExitCode::SUCCESS
        }
        Err(err) => fail(&err, &mut stdout),
    }
}
