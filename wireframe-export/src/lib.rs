//! # wireframe-export
//!
//! Batch export of low-fidelity SVG wireframes (`*_lowfi.svg`) to PNG.
//!
//! The crate keeps the export pipeline (discovery, naming, error
//! classification, reporting) separate from the rasterization backend, which is
//! reached only through the [`Rasterize`] trait.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use wireframe_export::{BackendKind, ExportConfig, load_backend, run};
//!
//! let config = ExportConfig::for_project_root(Path::new("."));
//! let mut stdout = std::io::stdout();
//! let summary = run(&config, || load_backend(BackendKind::Resvg, None), &mut stdout).unwrap();
//! println!("Exported {} wireframe(s)", summary.exported.len());
//! ```

mod config;
mod discover;
mod error;
mod export;
pub mod guidance;
pub mod raster;

pub use config::{
    DEFAULT_PATTERN, DEFAULT_WIDTH, ExportConfig, default_project_root, project_root_for_exe,
};
pub use discover::{find_wireframes, output_path_for};
pub use error::ExportError;
pub use export::{ExportSummary, export_all, prepare_output_dir, run};
pub use guidance::write_error;
pub use raster::{BackendKind, Rasterize, RasterizeError, load_backend};
