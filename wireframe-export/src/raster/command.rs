//! Rasterization through an external `rsvg-convert` compatible program.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use super::{Rasterize, RasterizeError};

/// `STATUS_DLL_NOT_FOUND` (0xC0000135) as reported by `ExitStatus::code` on Windows.
const STATUS_DLL_NOT_FOUND: i32 = -1_073_741_515;

/// Shells out to a program accepting `rsvg-convert` arguments.
#[derive(Debug, Clone)]
pub struct CommandRasterizer {
    program: PathBuf,
}

impl CommandRasterizer {
    pub const DEFAULT_PROGRAM: &'static str = "rsvg-convert";

    /// Check that `program` starts and answers `--version`.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason if the program is not installed or
    /// cannot run.
    pub fn locate(program: &Path) -> Result<Self, String> {
        match Command::new(program).arg("--version").output() {
            Ok(output) if output.status.success() => {
                tracing::debug!(
                    program = %program.display(),
                    version = %String::from_utf8_lossy(&output.stdout).trim(),
                    "rasterizer program available"
                );
                Ok(Self {
                    program: program.to_owned(),
                })
            }
            Ok(output) => Err(format!(
                "'{} --version' exited with {}: {}",
                program.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(format!(
                "program '{}' was not found on PATH",
                program.display()
            )),
            Err(e) => Err(format!("failed to start '{}': {e}", program.display())),
        }
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Rasterize for CommandRasterizer {
    fn name(&self) -> &str {
        Self::DEFAULT_PROGRAM
    }

    fn rasterize(&self, input: &Path, output: &Path, width: u32) -> Result<(), RasterizeError> {
        let result = Command::new(&self.program)
            .arg("--width")
            .arg(width.to_string())
            .arg("--keep-aspect-ratio")
            .arg("--format")
            .arg("png")
            .arg("--output")
            .arg(output)
            .arg(input)
            .output()
            .map_err(|e| {
                RasterizeError::Failed(format!(
                    "failed to start '{}': {e}",
                    self.program.display()
                ))
            })?;

        if result.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&result.stderr).trim().to_owned();
        let message = if stderr.is_empty() {
            format!("'{}' exited with {}", self.program.display(), result.status)
        } else {
            stderr
        };

        if exited_with_missing_dll(result.status) {
            return Err(RasterizeError::RuntimeMissing(message));
        }
        Err(RasterizeError::from_message(message))
    }
}

fn exited_with_missing_dll(status: ExitStatus) -> bool {
    cfg!(windows) && status.code() == Some(STATUS_DLL_NOT_FOUND)
}
