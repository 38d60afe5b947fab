// Integration tests for cli/args.rs: the clap definition as users see it.

use std::path::PathBuf;

use clap::Parser;
use lzf::cli::args::{parse_byte_size, Cli, Cmd, StrategyArg};

fn parse(argv: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(argv)
}

#[test]
fn subcommand_is_required() {
    assert!(parse(&["lzf"]).is_err());
}

#[test]
fn decompress_to_stdout() {
    let cli = parse(&["lzf", "decompress", "-c", "in.lzf"]).unwrap();
    let Cmd::Decompress(a) = cli.command else { panic!("expected decompress") };
    assert_eq!(a.input, PathBuf::from("in.lzf"));
    assert!(a.output.stdout);
    assert_eq!(a.strategy, StrategyArg::Optimized);
}

#[test]
fn output_and_stdout_conflict() {
    assert!(parse(&["lzf", "compress", "x", "-c", "-o", "y"]).is_err());
}

#[test]
fn quiet_and_verbose_conflict() {
    assert!(parse(&["lzf", "-q", "-v", "test", "x"]).is_err());
}

#[test]
fn display_level_is_clamped() {
    let cli = parse(&["lzf", "-qqqq", "test", "x"]).unwrap();
    assert_eq!(cli.display_level(), 0);
    let cli = parse(&["lzf", "-vvvvv", "test", "x"]).unwrap();
    assert_eq!(cli.display_level(), 4);
}

#[test]
fn block_size_bounds() {
    assert!(parse(&["lzf", "compress", "x", "-B", "65536"]).is_err());
    assert!(parse(&["lzf", "compress", "x", "-B", "0"]).is_err());
    let cli = parse(&["lzf", "compress", "x", "--block-size", "1K"]).unwrap();
    let Cmd::Compress(a) = cli.command else { panic!("expected compress") };
    assert_eq!(a.block_size, 1024);
}

#[test]
fn thread_bounds() {
    assert!(parse(&["lzf", "compress", "x", "-T", "201"]).is_err());
    assert!(parse(&["lzf", "compress", "x", "-T", "200"]).is_ok());
}

#[test]
fn test_needs_inputs() {
    assert!(parse(&["lzf", "test"]).is_err());
    let cli = parse(&["lzf", "test", "a.lzf", "b.lzf"]).unwrap();
    let Cmd::Test(a) = cli.command else { panic!("expected test") };
    assert_eq!(a.inputs.len(), 2);
}

#[test]
fn bench_options() {
    let cli = parse(&["lzf", "bench", "f", "--rounds", "4", "--warmup", "1", "--pause-ms", "0", "--target", "2M"]).unwrap();
    let Cmd::Bench(a) = cli.command else { panic!("expected bench") };
    assert_eq!(a.rounds, 4);
    assert_eq!(a.warmup, 1);
    assert_eq!(a.pause_ms, 0);
    assert_eq!(a.target_bytes, Some(2 << 20));
}

#[test]
fn byte_size_overflow() {
    assert!(parse_byte_size(&format!("{}M", u64::MAX)).is_err());
}
