// cli/args.rs: Command-line definition for the `lzf` binary.
//
// Explicit subcommands with long-form options; global -v/-q adjust the
// display level.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};

use crate::bench::config::{PAUSE_MS_DEFAULT, ROUNDS_DEFAULT, WARMUP_ROUNDS_DEFAULT};
use crate::chunk::MAX_CHUNK_LEN;
use crate::cli::constants::{KB, MB};
use crate::codec::Strategy;
use crate::config::{BLOCK_SIZE_DEFAULT, BLOCK_SIZE_MIN, NB_WORKERS_DEFAULT, NB_WORKERS_MAX};

// ── Byte size parsing (K / M suffixes) ───────────────────────────────────────

/// Parse a byte count such as `4096`, `16K` or `1M`.
pub fn parse_byte_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty size string".into());
    }
    let (num_part, multiplier) = match s.as_bytes().last() {
        Some(b'k' | b'K') => (&s[..s.len() - 1], KB as u64),
        Some(b'm' | b'M') => (&s[..s.len() - 1], MB as u64),
        _ => (s, 1u64),
    };
    let num: u64 = num_part
        .trim()
        .parse()
        .map_err(|e| format!("invalid size '{}': {}", s, e))?;
    num.checked_mul(multiplier)
        .ok_or_else(|| format!("size overflow: '{}'", s))
}

/// Parse a streaming block size and check it against the chunk ceiling.
fn parse_block_size(s: &str) -> Result<usize, String> {
    let size = parse_byte_size(s)?;
    if size < BLOCK_SIZE_MIN as u64 || size > MAX_CHUNK_LEN as u64 {
        return Err(format!(
            "block size {} out of range ({}..={})",
            size, BLOCK_SIZE_MIN, MAX_CHUNK_LEN
        ));
    }
    Ok(size as usize)
}

// ── Clap definition ──────────────────────────────────────────────────────────

/// LZF block compressor.
#[derive(Parser, Debug)]
#[command(
    name = "lzf",
    version,
    about = "LZF block compressor",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Cmd,

    /// Quiet mode (errors only; repeat to silence errors too).
    #[arg(short = 'q', long, global = true, action = ArgAction::Count, conflicts_with = "verbose")]
    pub quiet: u8,

    /// Verbose mode (repeat for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Display level implied by the -v / -q counts (default 2).
    pub fn display_level(&self) -> u32 {
        let base: i64 = 2 + self.verbose as i64 - self.quiet as i64;
        base.clamp(0, 4) as u32
    }
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Compress a file into FILE.lzf.
    Compress(CompressArgs),
    /// Decompress FILE.lzf.
    Decompress(DecompressArgs),
    /// Decode a file and discard the output, reporting any corruption.
    Test(TestArgs),
    /// Compare encoder and decoder implementations on a file.
    Bench(BenchArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Portable,
    Optimized,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Portable => Strategy::Portable,
            StrategyArg::Optimized => Strategy::Optimized,
        }
    }
}

#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Output file (default: derived from the input name; `-` for stdout).
    #[arg(short = 'o', long, value_hint = ValueHint::FilePath, conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Write to stdout.
    #[arg(short = 'c', long)]
    pub stdout: bool,

    /// Overwrite existing output files.
    #[arg(short = 'f', long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompressArgs {
    /// Input file (`-` for stdin).
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Block size in bytes (supports K suffix; at most 65535).
    #[arg(short = 'B', long = "block-size", value_parser = parse_block_size, default_value_t = BLOCK_SIZE_DEFAULT)]
    pub block_size: usize,

    /// Encoder implementation.
    #[arg(long, value_enum, default_value_t = StrategyArg::Optimized)]
    pub strategy: StrategyArg,

    /// Encoder threads (0 = one per CPU, 1 = single-threaded).
    #[arg(short = 'T', long = "threads", default_value_t = NB_WORKERS_DEFAULT as u32,
          value_parser = clap::value_parser!(u32).range(0..=NB_WORKERS_MAX as i64))]
    pub workers: u32,
}

#[derive(Args, Debug)]
pub struct DecompressArgs {
    /// Input file (`-` for stdin).
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Decoder implementation.
    #[arg(long, value_enum, default_value_t = StrategyArg::Optimized)]
    pub strategy: StrategyArg,
}

#[derive(Args, Debug)]
pub struct TestArgs {
    /// Compressed file(s) to check.
    #[arg(required = true, value_hint = ValueHint::FilePath)]
    pub inputs: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub struct BenchArgs {
    /// File to benchmark.
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Measured rounds.
    #[arg(long, default_value_t = ROUNDS_DEFAULT)]
    pub rounds: u32,

    /// Warm-up rounds excluded from the averages.
    #[arg(long, default_value_t = WARMUP_ROUNDS_DEFAULT)]
    pub warmup: u32,

    /// Pause before each timed pass, in milliseconds.
    #[arg(long = "pause-ms", default_value_t = PAUSE_MS_DEFAULT)]
    pub pause_ms: u64,

    /// Bytes each timed pass should process (supports K/M suffixes).
    #[arg(long = "target", value_parser = parse_byte_size)]
    pub target_bytes: Option<u64>,
}
