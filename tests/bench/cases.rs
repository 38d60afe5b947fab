// Integration tests for bench/cases.rs.

use std::io::Write;

use lzf::bench::{BenchCase, CaseRunner, CountingSink};
use lzf::encode;

fn sample() -> Vec<u8> {
    b"benchmark input with some repeated words, repeated words. ".repeat(300)
}

#[test]
fn every_case_reports_its_output_size() {
    let input = sample();
    let encoded = encode(&input);
    for case in BenchCase::ALL {
        let mut runner = CaseRunner::new(case, 65_535);
        let size = runner.run(2, &input, &encoded).unwrap();
        let want = if case.is_compress() { encoded.len() } else { input.len() };
        assert_eq!(size, want, "{case}");
        assert_eq!(runner.case(), case);
    }
}

#[test]
fn stream_case_honours_block_size() {
    let input = sample();
    let mut small = CaseRunner::new(BenchCase::CompressStream, 1000);
    let mut large = CaseRunner::new(BenchCase::CompressStream, 65_535);
    let a = small.run(1, &input, &[]).unwrap();
    let b = large.run(1, &input, &[]).unwrap();
    assert!(a > b, "{a} <= {b}");
}

#[test]
fn decompress_case_rejects_corrupt_input() {
    let mut runner = CaseRunner::new(BenchCase::DecompressOptimized, 65_535);
    assert!(runner.run(1, b"", b"ZV\x01\x00\x08\x00\x02\x20\x00").is_err());
}

#[test]
fn zero_repetitions_do_nothing() {
    let mut runner = CaseRunner::new(BenchCase::CompressPortable, 65_535);
    assert_eq!(runner.run(0, b"unused", b"").unwrap(), 0);
}

#[test]
fn labels_are_distinct() {
    let mut labels: Vec<_> = BenchCase::ALL.iter().map(|c| c.label()).collect();
    labels.sort_unstable();
    labels.dedup();
    assert_eq!(labels.len(), BenchCase::ALL.len());
}

#[test]
fn counting_sink() {
    let mut sink = CountingSink::default();
    assert!(sink.is_empty());
    sink.write_all(&[0u8; 1234]).unwrap();
    assert_eq!(sink.len(), 1234);
}
