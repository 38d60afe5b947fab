// e2e/cli_integration.rs: CLI integration tests (Suite 05)
//
// Runs the `lzf` binary as a black box: subcommand dispatch, default output
// names, stdin/stdout piping, overwrite policy, exit codes, and verbosity.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn lzf_bin() -> &'static str {
    env!("CARGO_BIN_EXE_lzf")
}

/// TempDir holding `input.txt` with ~20 KB of text.
fn make_temp_input() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.txt");
    fs::write(&input, "Hello, LZF!\n".repeat(1700)).unwrap();
    (dir, input)
}

fn run(args: &[&str]) -> Output {
    Command::new(lzf_bin()).args(args).output().unwrap()
}

fn path_str(p: &Path) -> &str {
    p.to_str().unwrap()
}

// ── 1. Default names ─────────────────────────────────────────────────────────

#[test]
fn test_cli_compress_decompress_default_names() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();

    let out = run(&["compress", path_str(&input)]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let packed = dir.path().join("input.txt.lzf");
    assert!(packed.exists());
    assert!(fs::metadata(&packed).unwrap().len() < original.len() as u64);

    fs::remove_file(&input).unwrap();
    let out = run(&["decompress", path_str(&packed)]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read(&input).unwrap(), original);
}

#[test]
fn test_cli_decompress_unknown_extension_appends_out() {
    let (dir, input) = make_temp_input();
    let packed = dir.path().join("blob");
    assert!(run(&["compress", path_str(&input), "-o", path_str(&packed)]).status.success());
    assert!(run(&["decompress", path_str(&packed)]).status.success());
    assert_eq!(fs::read(dir.path().join("blob.out")).unwrap(), fs::read(&input).unwrap());
}

// ── 2. Pipes ─────────────────────────────────────────────────────────────────

#[test]
fn test_cli_stdin_to_stdout_roundtrip() {
    let data = b"piped through the lzf binary ".repeat(5000);

    let mut child = Command::new(lzf_bin())
        .args(["compress", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    let mut stdin = child.stdin.take().unwrap();
    let feed = data.clone();
    let writer = std::thread::spawn(move || stdin.write_all(&feed).unwrap());
    let out = child.wait_with_output().unwrap();
    writer.join().unwrap();
    assert!(out.status.success());
    assert_eq!(lzf::decode(&out.stdout).unwrap(), data);

    let mut child = Command::new(lzf_bin())
        .args(["decompress", "-", "-c"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    let mut stdin = child.stdin.take().unwrap();
    let packed = out.stdout;
    let writer = std::thread::spawn(move || stdin.write_all(&packed).unwrap());
    let out = child.wait_with_output().unwrap();
    writer.join().unwrap();
    assert!(out.status.success());
    assert_eq!(out.stdout, data);
}

// ── 3. Overwrite policy ──────────────────────────────────────────────────────

#[test]
fn test_cli_refuses_to_overwrite_without_force() {
    let (dir, input) = make_temp_input();
    let packed = dir.path().join("input.txt.lzf");
    fs::write(&packed, b"keep me").unwrap();

    let out = run(&["compress", path_str(&input)]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("already exists"));
    assert_eq!(fs::read(&packed).unwrap(), b"keep me");

    assert!(run(&["compress", "-f", path_str(&input)]).status.success());
    assert_eq!(lzf::decode(&fs::read(&packed).unwrap()).unwrap(), fs::read(&input).unwrap());
}

// ── 4. Test mode ─────────────────────────────────────────────────────────────

#[test]
fn test_cli_test_mode_valid_and_corrupt() {
    let (dir, input) = make_temp_input();
    assert!(run(&["compress", path_str(&input)]).status.success());
    let packed = dir.path().join("input.txt.lzf");
    assert!(run(&["test", path_str(&packed)]).status.success());

    let mut bytes = fs::read(&packed).unwrap();
    bytes[0] = b'X';
    let bad = dir.path().join("bad.lzf");
    fs::write(&bad, &bytes).unwrap();
    let out = run(&["test", path_str(&packed), path_str(&bad)]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("malformed"));
}

// ── 5. Errors and verbosity ──────────────────────────────────────────────────

#[test]
fn test_cli_nonexistent_input() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.txt");
    let out = run(&["compress", path_str(&missing)]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("cannot open"));
}

#[test]
fn test_cli_quiet_suppresses_summary() {
    let (_dir, input) = make_temp_input();
    let out = run(&["-q", "compress", "-c", path_str(&input)]);
    assert!(out.status.success());
    assert!(out.stderr.is_empty());
    assert!(!out.stdout.is_empty());

    let out = run(&["compress", "-c", path_str(&input)]);
    assert!(String::from_utf8_lossy(&out.stderr).contains("Compressed"));
}

#[test]
fn test_cli_strategy_and_threads_give_identical_files() {
    let (dir, input) = make_temp_input();
    let a = dir.path().join("a.lzf");
    let b = dir.path().join("b.lzf");
    assert!(run(&["compress", path_str(&input), "-o", path_str(&a), "--strategy", "portable", "-T", "1"]).status.success());
    assert!(run(&["compress", path_str(&input), "-o", path_str(&b), "-T", "4", "-B", "4K"]).status.success());
    // different block sizes, same content
    assert_eq!(lzf::decode(&fs::read(&a).unwrap()).unwrap(), lzf::decode(&fs::read(&b).unwrap()).unwrap());
}

#[test]
fn test_cli_version_and_usage() {
    let out = run(&["--version"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains(env!("CARGO_PKG_VERSION")));

    let out = run(&[]);
    assert!(!out.status.success());
}

#[test]
fn test_cli_bench_runs() {
    let (_dir, input) = make_temp_input();
    let out = run(&["bench", path_str(&input), "--rounds", "1", "--warmup", "0", "--pause-ms", "0", "--target", "40K"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stderr).contains("LZF compress/block"));
}
