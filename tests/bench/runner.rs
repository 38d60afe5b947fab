// Integration tests for bench/runner.rs.

use std::fs;

use lzf::bench::{bench_file, pre_validate, run_comparison, BenchCase, BenchConfig};
use tempfile::TempDir;

fn silent(rounds: u32) -> BenchConfig {
    let mut cfg = BenchConfig::default();
    cfg.set_notification_level(0)
        .set_target_bytes(50_000)
        .set_warmup_rounds(0)
        .set_rounds(rounds)
        .set_pause_ms(0);
    cfg
}

#[test]
fn pre_validation_accepts_mixed_content() {
    let mut input = b"a fairly ordinary line of text\n".repeat(500);
    input.extend((0..10_000u32).map(|i| (i.wrapping_mul(2_654_435_761) >> 13) as u8));
    pre_validate(&input).unwrap();
}

#[test]
fn repetitions_follow_target_bytes() {
    let input = vec![b'k'; 10_000];
    let summary = run_comparison(&input, &silent(1)).unwrap();
    assert_eq!(summary.repetitions, 5);
    assert_eq!(summary.input_len, 10_000);
}

#[test]
fn selected_cases_only() {
    let mut cfg = silent(2);
    cfg.set_cases(&[BenchCase::CompressOptimized, BenchCase::DecompressOptimized]);
    let summary = run_comparison(&b"selected ".repeat(1000), &cfg).unwrap();
    assert_eq!(summary.results.len(), 2);
    assert!(summary.result(BenchCase::CompressStream).is_none());
    assert!(summary.result(BenchCase::DecompressOptimized).is_some());
}

#[test]
fn bench_file_reads_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("corpus.txt");
    fs::write(&path, b"file based benchmark ".repeat(400)).unwrap();
    let summary = bench_file(&path, &silent(1)).unwrap();
    assert_eq!(summary.input_len, 21 * 400);
}

#[test]
fn bench_file_missing() {
    let dir = TempDir::new().unwrap();
    let err = bench_file(&dir.path().join("absent"), &silent(1)).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}
