//! The default project root follows the executable, wherever it is installed.
//!
//! Single test per binary: a freshly copied executable can fail with ETXTBSY
//! while sibling tests spawn processes.

use std::fs;
use std::process::Command;

use tempfile::TempDir;

const WIREFRAME: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100">
  <rect width="200" height="100" fill="#eee"/>
</svg>"##;

#[test]
fn test_installed_copy_exports_its_own_project() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().canonicalize().unwrap();
    let source = root.join("design").join("wireframes");
    fs::create_dir_all(&source).unwrap();
    fs::write(source.join("a_lowfi.svg"), WIREFRAME).unwrap();

    let scripts = root.join("scripts");
    fs::create_dir(&scripts).unwrap();
    let built = std::path::Path::new(env!("CARGO_BIN_EXE_export-wireframes"));
    let installed = scripts.join(built.file_name().unwrap());
    fs::copy(built, &installed).unwrap();

    let output = Command::new(&installed).output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert_eq!(output.status.code(), Some(0), "stdout: {stdout}");
    let png = source.join("png").join("a_lowfi.png");
    assert!(png.is_file(), "stdout: {stdout}");
    assert_eq!(stdout, format!("Exported {}\n", png.display()));
}
