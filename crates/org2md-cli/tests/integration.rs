//! Integration tests for the org2md binary

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::atomic::{AtomicU64, Ordering};

static COUNTER: AtomicU64 = AtomicU64::new(0);

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn org2md_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/debug/org2md")
}

/// Run org2md on a fixture file and return the raw process output
fn run_fixture(name: &str, args: &[&str]) -> Output {
    let input = fixtures_dir().join(name);
    let mut cmd = Command::new(org2md_binary());
    cmd.arg(&input);
    for arg in args {
        cmd.arg(arg);
    }
    cmd.output().expect("Failed to run org2md")
}

/// Convert a fixture to stdout and return the printed Markdown
fn convert_to_stdout(name: &str, args: &[&str]) -> String {
    let output = run_fixture(name, args);
    assert!(output.status.success(), "org2md failed: {:?}", output);
    String::from_utf8(output.stdout).expect("Invalid UTF-8")
}

/// A unique path in the temp directory for file-output tests
fn temp_output(name: &str) -> PathBuf {
    let unique_id = COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir().join(format!(
        "org2md_test_{}_{}_{}.md",
        name,
        std::process::id(),
        unique_id
    ))
}

#[test]
fn test_simple_to_stdout() {
    let output = convert_to_stdout("simple.org", &[]);
    insta::assert_snapshot!(output, @r#"
    # Notes
    ## Cluster Setup
    This is _important_ and `code` and [X](https://x.org).

    ```bash
    echo hi
    ```
    "#);
}

#[test]
fn test_links_to_stdout() {
    let output = convert_to_stdout("links.org", &[]);
    insta::assert_snapshot!(output, @r#"
    See [Example Page](https://example.com/page) for docs.
    Image: ![photo.PNG](img/photo.PNG)
    Report: [report.pdf](docs/report.pdf)
    Two: [A](https://a.org) and ![b.svg](b.svg)
    "#);
}

#[test]
fn test_write_to_file_with_progress() {
    let dest = temp_output("simple");
    let output = run_fixture("simple.org", &[dest.to_str().unwrap()]);
    assert!(output.status.success(), "org2md failed: {:?}", output);

    // Progress notices go to stderr only in file mode
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Transforming Org from"));
    assert!(stderr.contains("Writing output to"));
    assert!(output.stdout.is_empty());

    let written = fs::read_to_string(&dest).expect("Failed to read output file");
    let _ = fs::remove_file(&dest);
    assert!(written.starts_with("# Notes\n"));
    assert!(written.ends_with("```\n"));
}

#[test]
fn test_quiet_suppresses_progress() {
    let dest = temp_output("quiet");
    let output = run_fixture("simple.org", &[dest.to_str().unwrap(), "-q"]);
    assert!(output.status.success(), "org2md failed: {:?}", output);
    assert!(output.stderr.is_empty());

    let _ = fs::remove_file(&dest);
}

#[test]
fn test_stdout_mode_is_quiet() {
    let output = run_fixture("simple.org", &[]);
    assert!(output.status.success(), "org2md failed: {:?}", output);
    // Piped output stays clean without -q
    assert!(output.stderr.is_empty());
}

#[test]
fn test_missing_input_argument() {
    let output = Command::new(org2md_binary())
        .output()
        .expect("Failed to run org2md");
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"));
}

#[test]
fn test_nonexistent_input_path() {
    let output = Command::new(org2md_binary())
        .arg("/no/such/notes.org")
        .output()
        .expect("Failed to run org2md");
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot access file"));
}

#[test]
fn test_code_fixture_with_default_options() {
    let output = convert_to_stdout("code.org", &[]);
    insta::assert_snapshot!(output, @r#"
    ```
    plain block
    ```
    Pic: [a.webp](a.webp) not ![b.png](b.png)
    "#);
}

#[test]
fn test_code_fixture_with_config_file() {
    let config = fixtures_dir().join("custom.toml");
    let output = convert_to_stdout("code.org", &["--config", config.to_str().unwrap()]);
    insta::assert_snapshot!(output, @r#"
    ```text
    plain block
    ```
    Pic: ![a.webp](a.webp) not [b.png](b.png)
    "#);
}

#[test]
fn test_bad_config_file_aborts() {
    let dest = temp_output("bad_config");
    fs::write(&dest, "not [ valid toml").expect("Failed to write config");

    let output = run_fixture("simple.org", &["--config", dest.to_str().unwrap()]);
    let _ = fs::remove_file(&dest);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to parse config file"));
}
