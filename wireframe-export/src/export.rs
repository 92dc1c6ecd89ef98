//! The export pipeline: prepare, load backend, discover, convert.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::config::ExportConfig;
use crate::discover::{find_wireframes, output_path_for};
use crate::error::ExportError;
use crate::raster::Rasterize;

/// Outcome of a run in which every wireframe converted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct ExportSummary {
    /// PNG files written, in conversion order.
    pub exported: Vec<PathBuf>,
}

/// Create the output directory and any missing parents.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the directory cannot be created.
pub fn prepare_output_dir(config: &ExportConfig) -> Result<(), ExportError> {
    fs::create_dir_all(&config.output_dir).map_err(|source| ExportError::Io {
        action: "failed to create output directory",
        path: config.output_dir.clone(),
        source,
    })
}

/// Convert every matching wireframe, stopping at the first failure.
///
/// Writes `Exported <png>` to `out` after each successful conversion. Failures
/// are returned, not printed; see [`crate::write_error`].
///
/// # Errors
///
/// Returns the first conversion failure, or a discovery/report error.
pub fn export_all(
    config: &ExportConfig,
    rasterizer: &dyn Rasterize,
    out: &mut dyn Write,
) -> Result<ExportSummary, ExportError> {
    let wireframes = find_wireframes(&config.source_dir, &config.pattern)?;
    tracing::info!(
        count = wireframes.len(),
        backend = rasterizer.name(),
        "exporting wireframes"
    );

    let mut summary = ExportSummary::default();
    for svg in &wireframes {
        let png = output_path_for(svg, &config.output_dir);
        tracing::debug!(input = %svg.display(), output = %png.display(), "rasterizing");

        rasterizer
            .rasterize(svg, &png, config.width)
            .map_err(|e| ExportError::from_rasterize(svg, e))?;

        writeln!(out, "Exported {}", png.display())?;
        summary.exported.push(png);
    }

    Ok(summary)
}

/// Run a full export: create the output directory, load the backend with
/// `load`, then convert.
///
/// The backend is loaded before the source directory is scanned, so an
/// unavailable backend leaves no side effects beyond the output directory.
///
/// # Errors
///
/// Returns the first error met; [`ExportError::exit_code`] maps it to the
/// process exit code.
pub fn run<'r, F>(
    config: &ExportConfig,
    load: F,
    out: &mut dyn Write,
) -> Result<ExportSummary, ExportError>
where
    F: FnOnce() -> Result<Box<dyn Rasterize + 'r>, ExportError>,
{
    prepare_output_dir(config)?;
    let rasterizer = load()?;
    export_all(config, rasterizer.as_ref(), out)
}
