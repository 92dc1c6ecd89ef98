//! Integration tests for `spec_validator::validate_openapi` and the
//! `validate-openapi` binary.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use spec_validator::{
    OpenApiValidator, SearchConfig, SpecDocument, SpecError, Status, ValidateSpec,
    ValidationReport, Violations, validate_openapi,
};
use tempfile::TempDir;

const VALID_SPEC: &str = r"openapi: 3.0.3
info:
  title: MindGarden API
  version: 1.0.0
servers:
  - url: https://api.mindgarden.app/v1
paths:
  /journal/entries:
    get:
      operationId: listEntries
      tags: [journal]
      parameters:
        - name: limit
          in: query
          schema:
            type: integer
      responses:
        '200':
          description: Journal entries
          content:
            application/json:
              schema:
                type: array
                items:
                  $ref: '#/components/schemas/Entry'
    post:
      operationId: createEntry
      requestBody:
        required: true
        content:
          application/json:
            schema:
              $ref: '#/components/schemas/Entry'
      responses:
        '201':
          description: Created
  /journal/entries/{entryId}:
    parameters:
      - $ref: '#/components/parameters/EntryId'
    get:
      operationId: getEntry
      responses:
        '200':
          description: One entry
        '404':
          description: Not found
components:
  parameters:
    EntryId:
      name: entryId
      in: path
      required: true
      schema:
        type: string
  schemas:
    Entry:
      type: object
      required: [id, mood]
      properties:
        id:
          type: string
        mood:
          type: integer
          minimum: 1
          maximum: 5
";

fn write_spec(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("openapi").join("mindgarden.yaml");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

fn run_in(cwd: &Path) -> Result<PathBuf, SpecError> {
    validate_openapi(&SearchConfig::default_for(cwd), &OpenApiValidator)
}

fn cli(cwd: &Path, args: &[&str]) -> (u8, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_validate-openapi"))
        .args(args)
        .current_dir(cwd)
        .output()
        .unwrap();
    let code = u8::try_from(output.status.code().unwrap()).unwrap();
    (code, String::from_utf8(output.stdout).unwrap())
}

#[test]
fn test_valid_spec_in_working_directory() {
    let tmp = TempDir::new().unwrap();
    let path = write_spec(tmp.path(), VALID_SPEC);

    assert_eq!(run_in(tmp.path()).unwrap(), path);
}

#[test]
fn test_valid_spec_in_parent_directory() {
    let tmp = TempDir::new().unwrap();
    write_spec(tmp.path(), VALID_SPEC);
    let cwd = tmp.path().join("scripts");
    fs::create_dir(&cwd).unwrap();

    let found = run_in(&cwd).unwrap();
    assert_eq!(found, cwd.join("..").join("openapi").join("mindgarden.yaml"));
}

#[test]
fn test_working_directory_wins_over_parent() {
    let tmp = TempDir::new().unwrap();
    write_spec(tmp.path(), "not: [valid");
    let cwd = tmp.path().join("backend");
    let preferred = write_spec(&cwd, VALID_SPEC);

    assert_eq!(run_in(&cwd).unwrap(), preferred);
}

#[test]
fn test_missing_openapi_field_fails_with_exit_3() {
    let tmp = TempDir::new().unwrap();
    write_spec(
        tmp.path(),
        "info:\n  title: MindGarden API\n  version: 1.0.0\npaths: {}\n",
    );

    let err = run_in(tmp.path()).unwrap_err();
    assert_eq!(err.exit_code(), 3);
    let report = ValidationReport::from(Err(err));
    assert_eq!(report.status, Status::Failed);
    assert!(
        report
            .violations
            .iter()
            .any(|v| v.message.contains("'openapi' is a required property")),
        "got: {:?}",
        report.violations
    );
}

#[test]
fn test_yaml_syntax_error_fails_with_exit_2() {
    let tmp = TempDir::new().unwrap();
    write_spec(
        tmp.path(),
        "openapi: 3.0.3\ninfo:\n  title: \"MindGarden API\n  version: 1.0.0\n",
    );

    let err = run_in(tmp.path()).unwrap_err();
    assert!(matches!(err, SpecError::Load { .. }), "got: {err}");
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_not_found_lists_four_default_paths() {
    let tmp = TempDir::new().unwrap();
    let cwd = tmp.path().join("empty");
    fs::create_dir(&cwd).unwrap();

    match run_in(&cwd) {
        Err(SpecError::NotFound { tried }) => {
            assert_eq!(tried, SearchConfig::default_for(&cwd).candidates);
            assert_eq!(tried.len(), 4);
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn test_reference_in_example_value_is_sample_data() {
    let tmp = TempDir::new().unwrap();
    write_spec(
        tmp.path(),
        r"openapi: 3.0.3
info:
  title: MindGarden API
  version: 1.0.0
paths: {}
components:
  examples:
    SchemaDoc:
      summary: A JSON Schema document returned by the export endpoint
      value:
        $ref: '#/definitions/Foo'
",
    );

    run_in(tmp.path()).unwrap();
}

#[test]
fn test_anchor_reference_in_3_1_schema() {
    let tmp = TempDir::new().unwrap();
    write_spec(
        tmp.path(),
        r"openapi: 3.1.0
info:
  title: MindGarden API
  version: 1.0.0
paths: {}
components:
  schemas:
    Thread:
      $anchor: node
      type: object
      properties:
        next:
          $ref: '#node'
",
    );

    run_in(tmp.path()).unwrap();
}

#[test]
fn test_custom_validator_is_used() {
    struct RejectAll;
    impl ValidateSpec for RejectAll {
        fn validate(&self, document: &SpecDocument) -> Result<(), Violations> {
            Err(Violations::single(
                "",
                format!("rejected {}", document.path().display()),
            ))
        }
    }

    let tmp = TempDir::new().unwrap();
    write_spec(tmp.path(), VALID_SPEC);

    let err = validate_openapi(&SearchConfig::default_for(tmp.path()), &RejectAll).unwrap_err();
    assert_eq!(err.exit_code(), 3);
    assert!(err.to_string().contains("rejected"), "got: {err}");
}

#[test]
fn test_cli_success() {
    let tmp = TempDir::new().unwrap();
    write_spec(tmp.path(), VALID_SPEC);

    let (code, stdout) = cli(tmp.path(), &[]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "OpenAPI validation: SUCCESS\n");
}

#[test]
fn test_cli_schema_violation() {
    let tmp = TempDir::new().unwrap();
    write_spec(tmp.path(), "openapi: 3.0.3\ninfo:\n  version: 1.0.0\npaths: {}\n");

    let (code, stdout) = cli(tmp.path(), &[]);
    assert_eq!(code, 3);
    assert!(stdout.starts_with("OpenAPI validation: FAILED\n"), "got: {stdout}");
    assert!(stdout.contains("\"title\" is a required property"), "got: {stdout}");
}

#[test]
fn test_cli_not_found_prints_tried_paths_in_order() {
    let tmp = TempDir::new().unwrap();
    let cwd = tmp.path().join("empty");
    fs::create_dir(&cwd).unwrap();
    let cwd = cwd.canonicalize().unwrap();

    let (code, stdout) = cli(&cwd, &[]);
    assert_eq!(code, 2);

    let mut expected = String::from("ERROR: OpenAPI file not found. Tried:\n");
    for path in SearchConfig::default_for(&cwd).candidates {
        writeln!(expected, " - {}", path.display()).unwrap();
    }
    assert_eq!(stdout, expected);
}

#[test]
fn test_cli_yaml_syntax_error() {
    let tmp = TempDir::new().unwrap();
    write_spec(
        tmp.path(),
        "openapi: 3.0.3\ninfo:\n  title: \"MindGarden API\n  version: 1.0.0\n",
    );

    let (code, stdout) = cli(tmp.path(), &[]);
    assert_eq!(code, 2);
    assert!(stdout.starts_with("ERROR: Failed to load YAML:\n"), "got: {stdout}");
    assert!(stdout.lines().count() >= 2, "parser message missing: {stdout}");
    assert!(!stdout.contains("OpenAPI validation"), "got: {stdout}");
}

#[test]
fn test_cli_explicit_candidates_and_json_output() {
    let tmp = TempDir::new().unwrap();
    let spec = tmp.path().join("api.yaml");
    fs::write(&spec, "openapi: [3.0.3\n").unwrap();

    let (code, stdout) = cli(
        tmp.path(),
        &["--candidate", "missing.yaml", "--candidate", "api.yaml", "--format", "json"],
    );
    assert_eq!(code, 2);

    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["status"], "load_error");
    assert_eq!(value["file"], "api.yaml");
}
