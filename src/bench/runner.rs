//! Comparison runner: pre-validation, the round-robin timing loop, and the
//! summary it produces.
//!
//! 1. **Validation** ([`pre_validate`]): both encoders must emit identical
//!    bytes and both decoders must reproduce the input, before anything is
//!    timed.
//! 2. **Timing** ([`run_comparison`]): every configured case runs
//!    `repetitions` times per round, cases taking turns.  The first
//!    `warmup_rounds` rounds are printed but not counted.
//! 3. **Summary** ([`BenchSummary`]): per-case average milliseconds per
//!    round and the output size of the last pass.

use std::fs;
use std::io;
use std::path::Path;

use xxhash_rust::xxh64::xxh64;

use super::cases::{BenchCase, CaseRunner};
use super::config::{BenchConfig, REPORT_EVERY};
use crate::codec::{decode_with, encode, encode_with, Strategy};
use crate::displaylevel;
use crate::timefn::{clock_span_ns, ns_to_ms, pause_ms, wait_for_next_tick, TimeT};

/// Print to stderr when the run's configured verbosity reaches `level`.
macro_rules! bench_display {
    ($config:expr, $level:expr, $($arg:tt)*) => {
        if $config.display_level >= $level {
            eprint!($($arg)*);
        }
    };
}

// ── Validation ────────────────────────────────────────────────────────────────

fn first_difference(a: &[u8], b: &[u8]) -> Option<usize> {
    a.iter().zip(b).position(|(x, y)| x != y)
}

/// Check that both encoders agree and both decoders round-trip `input`.
pub fn pre_validate(input: &[u8]) -> io::Result<()> {
    let portable = encode_with(Strategy::Portable, input);
    let optimized = encode_with(Strategy::Optimized, input);

    if portable.len() != optimized.len() {
        return Err(io::Error::other(format!(
            "Compressed contents differ! ({} vs {} bytes)",
            portable.len(),
            optimized.len()
        )));
    }
    if let Some(i) = first_difference(&portable, &optimized) {
        return Err(io::Error::other(format!(
            "Compressed contents differ at {}/{}",
            i,
            portable.len()
        )));
    }

    let expected = xxh64(input, 0);
    for strategy in Strategy::ALL {
        let decoded = decode_with(strategy, &portable)?;
        if decoded.len() != input.len() {
            return Err(io::Error::other(format!(
                "Uncompressed contents differ! ({} decoder: {} vs {} bytes)",
                strategy,
                decoded.len(),
                input.len()
            )));
        }
        if xxh64(&decoded, 0) != expected {
            let at = first_difference(&decoded, input).unwrap_or(0);
            return Err(io::Error::other(format!(
                "Uncompressed contents differ at {}/{} ({} decoder)",
                at,
                input.len(),
                strategy
            )));
        }
    }
    displaylevel!(4, "pre-validation ok: {} -> {} bytes, xxh64 {:016x}\n", input.len(), portable.len(), expected);
    Ok(())
}

// ── Summary ───────────────────────────────────────────────────────────────────

/// Outcome of one case.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseResult {
    pub case: BenchCase,
    /// Average milliseconds per measured round (0 when nothing was measured).
    pub avg_ms: f64,
    /// Output size of the last pass.
    pub output_len: usize,
}

/// Outcome of [`run_comparison`].
#[derive(Debug, Clone, PartialEq)]
pub struct BenchSummary {
    pub input_len: usize,
    pub repetitions: usize,
    /// Rounds that contributed to the averages.
    pub measured_rounds: u32,
    pub results: Vec<CaseResult>,
}

impl BenchSummary {
    pub fn result(&self, case: BenchCase) -> Option<&CaseResult> {
        self.results.iter().find(|r| r.case == case)
    }

    /// Throughput of `case` in MB/s over the bytes it consumed per round.
    pub fn mb_per_s(&self, case: BenchCase) -> Option<f64> {
        let r = self.result(case)?;
        if r.avg_ms <= 0.0 {
            return None;
        }
        let bytes = (self.input_len * self.repetitions) as f64;
        Some(bytes / (r.avg_ms / 1000.0) / 1_000_000.0)
    }
}

fn print_averages(config: &BenchConfig, totals: &[u64], measured: u32) {
    let avgs: Vec<String> = totals
        .iter()
        .map(|&ns| format!("{:.1}", ns_to_ms(ns) / measured as f64))
        .collect();
    bench_display!(config, 2, "Averages after {} rounds: {} msecs\n\n", measured, avgs.join(" / "));
}

#[cfg(feature = "realtime-priority")]
fn raise_priority() {
    // SAFETY: setpriority(2) adjusts only the calling process's scheduling
    // priority; it has no memory-safety implications.
    unsafe {
        libc::setpriority(libc::PRIO_PROCESS, 0, -20);
    }
}

// ── Timing loop ───────────────────────────────────────────────────────────────

/// Validate, then time every configured case on `input`.
pub fn run_comparison(input: &[u8], config: &BenchConfig) -> io::Result<BenchSummary> {
    if input.is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "nothing to benchmark: input is empty"));
    }
    pre_validate(input)?;

    #[cfg(feature = "realtime-priority")]
    raise_priority();

    let reps = config.repetitions_for(input.len());
    let encoded = encode(input);
    bench_display!(
        config,
        2,
        "Read {} bytes to compress, uncompress; will do {} repetitions\n",
        input.len(),
        reps
    );

    let mut runners: Vec<CaseRunner> = config
        .cases
        .iter()
        .map(|&case| CaseRunner::new(case, config.block_size))
        .collect();
    let mut totals = vec![0u64; runners.len()];
    let mut sizes = vec![0usize; runners.len()];

    let total_rounds = config.warmup_rounds + config.rounds;
    for round in 0..total_rounds {
        let counted = round >= config.warmup_rounds;
        for (idx, runner) in runners.iter_mut().enumerate() {
            pause_ms(config.pause_ms);
            wait_for_next_tick();
            let start = TimeT::now();
            sizes[idx] = runner.run(reps, input, &encoded)?;
            let ns = clock_span_ns(start);
            if counted {
                totals[idx] += ns;
            }
            bench_display!(
                config,
                3,
                "Test '{}' [{} bytes] -> {:.1} msecs{}\n",
                runner.case(),
                sizes[idx],
                ns_to_ms(ns),
                if counted { "" } else { " (warm-up)" }
            );
        }
        let measured = (round + 1).saturating_sub(config.warmup_rounds);
        if measured > 0 && measured % REPORT_EVERY == 0 && !runners.is_empty() {
            print_averages(config, &totals, measured);
        }
    }

    let measured = config.rounds;
    let results = runners
        .iter()
        .enumerate()
        .map(|(idx, runner)| CaseResult {
            case: runner.case(),
            avg_ms: if measured == 0 { 0.0 } else { ns_to_ms(totals[idx]) / measured as f64 },
            output_len: sizes[idx],
        })
        .collect();

    Ok(BenchSummary {
        input_len: input.len(),
        repetitions: reps,
        measured_rounds: measured,
        results,
    })
}

// ── File entry point ──────────────────────────────────────────────────────────

/// Load `path` and run the comparison on its contents.
pub fn bench_file(path: &Path, config: &BenchConfig) -> io::Result<BenchSummary> {
    let input = fs::read(path)
        .map_err(|e| io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))?;
    let summary = run_comparison(&input, config)?;
    for r in &summary.results {
        let speed = summary
            .mb_per_s(r.case)
            .map(|s| format!("{:.1} MB/s", s))
            .unwrap_or_else(|| "n/a".to_string());
        bench_display!(config, 2, "{:<32} {:>10.1} ms {:>14} bytes  {}\n", r.case.label(), r.avg_ms, r.output_len, speed);
    }
    Ok(summary)
}
