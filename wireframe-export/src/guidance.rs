//! Human-readable failure reports and remediation guides.

use std::io::{self, Write};

use crate::error::ExportError;

const WINDOWS_RUNTIME_GUIDE: &str = "\
Cairo/librsvg native runtime not found. On Windows the easiest option is to install MSYS2 and the mingw-w64 packages.
Follow these steps in PowerShell:

1) Install MSYS2 (if not installed):
   - Download and run the installer from https://www.msys2.org/ and follow the 'Installation' section.
2) Open the 'MSYS2 MinGW 64-bit' shell and update packages:
   pacman -Syu
3) Install the mingw-w64 cairo and librsvg runtime:
   pacman -S mingw-w64-x86_64-cairo mingw-w64-x86_64-pango mingw-w64-x86_64-gdk-pixbuf2 mingw-w64-x86_64-librsvg
4) Add the MSYS2 mingw64 bin folder to PATH for the current PowerShell session (adjust if MSYS2 lives elsewhere):
   $env:Path = 'C:/msys64/mingw64/bin;' + $env:Path
5) Re-run this tool from the same session. If it still fails, check that 'libcairo-2.dll' is on PATH.
6) Alternatively, re-run with '--backend resvg', which needs no native runtime.
";

const MACOS_RUNTIME_GUIDE: &str = "\
Cairo/librsvg native runtime not found. Install it with Homebrew:

1) Install Homebrew if needed: https://brew.sh/
2) Install the runtime:
   brew install cairo librsvg
3) Make sure the Homebrew prefix is on your library path (Apple Silicon):
   export DYLD_FALLBACK_LIBRARY_PATH=/opt/homebrew/lib:$DYLD_FALLBACK_LIBRARY_PATH
4) Re-run this tool, or use '--backend resvg', which needs no native runtime.
";

const LINUX_RUNTIME_GUIDE: &str = "\
Cairo/librsvg native runtime not found. Install it with your package manager:

   Debian/Ubuntu: sudo apt-get install librsvg2-bin libcairo2
   Fedora/RHEL:   sudo dnf install librsvg2-tools cairo
   Arch:          sudo pacman -S librsvg cairo

Then re-run this tool, or use '--backend resvg', which needs no native runtime.
";

const GENERIC_HINT: &str = "\
If this is a cairo/librsvg error, install the native runtime for your platform \
(on Windows: MSYS2 with the mingw-w64 cairo and librsvg packages), \
or re-run with '--backend resvg'.";

/// Native runtime install guide for the operating system named `os`
/// (as in [`std::env::consts::OS`]).
#[must_use]
pub fn native_runtime_guide(os: &str) -> &'static str {
    match os {
        "windows" => WINDOWS_RUNTIME_GUIDE,
        "macos" => MACOS_RUNTIME_GUIDE,
        _ => LINUX_RUNTIME_GUIDE,
    }
}

fn install_instructions(backend: &str) -> String {
    format!(
        "Make sure the '{backend}' rasterizer is installed and on PATH:\n\
         \x20   Debian/Ubuntu: sudo apt-get install librsvg2-bin\n\
         \x20   macOS:         brew install librsvg\n\
         \x20   Windows:       pacman -S mingw-w64-x86_64-librsvg (MSYS2)\n\
         Or pass '--program <path>' to point at it, or use '--backend resvg'."
    )
}

/// Print the failure report for `err` to `out`, including remediation text.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_error(err: &ExportError, os: &str, out: &mut dyn Write) -> io::Result<()> {
    match err {
        ExportError::BackendUnavailable { backend, reason } => {
            writeln!(
                out,
                "Error: could not load the '{backend}' rasterization backend."
            )?;
            writeln!(out, "{}", install_instructions(backend))?;
            writeln!(out, "Load error: {reason}")?;
        }
        ExportError::RuntimeMissing { file, message } => {
            writeln!(out, "Failed to export {}:", file.display())?;
            writeln!(out, "{message}")?;
            writeln!(out)?;
            write!(out, "{}", native_runtime_guide(os))?;
        }
        ExportError::Conversion { file, message } => {
            writeln!(out, "Failed to export {}:", file.display())?;
            writeln!(out, "{message}")?;
            writeln!(out)?;
            writeln!(out, "{GENERIC_HINT}")?;
        }
        ExportError::InvalidPattern { .. }
        | ExportError::ProjectRoot { .. }
        | ExportError::Io { .. }
        | ExportError::Report(_) => {
            writeln!(out, "Error: {err}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn render(err: &ExportError, os: &str) -> String {
        let mut buf = Vec::new();
        write_error(err, os, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_runtime_missing_prints_platform_guide() {
        let err = ExportError::RuntimeMissing {
            file: PathBuf::from("design/wireframes/home_lowfi.svg"),
            message: "no library called \"cairo-2\" was found".to_owned(),
        };

        let windows = render(&err, "windows");
        assert!(windows.starts_with("Failed to export design/wireframes/home_lowfi.svg:\n"));
        assert!(windows.contains("no library called \"cairo-2\" was found"));
        assert!(windows.contains("pacman -S mingw-w64-x86_64-cairo"));
        assert!(windows.contains("libcairo-2.dll"));

        assert!(render(&err, "macos").contains("brew install cairo librsvg"));
        assert!(render(&err, "linux").contains("apt-get install librsvg2-bin"));
    }

    #[test]
    fn test_conversion_prints_generic_hint() {
        let err = ExportError::Conversion {
            file: PathBuf::from("a_lowfi.svg"),
            message: "unknown token".to_owned(),
        };
        let text = render(&err, "linux");
        assert!(text.starts_with("Failed to export a_lowfi.svg:\nunknown token\n"));
        assert!(text.contains("MSYS2"));
        assert!(!text.contains("pacman -Syu"));
    }

    #[test]
    fn test_backend_unavailable_prints_install_instructions() {
        let err = ExportError::BackendUnavailable {
            backend: "rsvg-convert".to_owned(),
            reason: "program 'rsvg-convert' was not found on PATH".to_owned(),
        };
        let text = render(&err, "linux");
        assert!(text.contains("could not load the 'rsvg-convert' rasterization backend"));
        assert!(text.contains("sudo apt-get install librsvg2-bin"));
        assert!(text.contains("Load error: program 'rsvg-convert' was not found on PATH"));
    }
}
