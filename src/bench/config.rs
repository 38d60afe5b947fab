//! Perf-comparison configuration: defaults and runtime knobs for the `bench`
//! subsystem.
//!
//! [`BenchConfig`] holds every tuneable setting for one comparison run:
//! how much data each timed pass processes, how many rounds are discarded as
//! warm-up, how many are measured, and which cases take part.  Its
//! builder-style setters let callers adjust a [`Default`] configuration
//! incrementally.

use super::cases::BenchCase;

// ── Defaults ─────────────────────────────────────────────────────────────────

/// Bytes each timed pass should process; the repetition count is derived
/// from it (10 MB, decimal).
pub const TARGET_BYTES_DEFAULT: usize = 10 * 1000 * 1000;

/// Rounds run before timings start counting.
pub const WARMUP_ROUNDS_DEFAULT: u32 = 5;

/// Rounds that contribute to the averages.
pub const ROUNDS_DEFAULT: u32 = 12;

/// Averages are reported every this many measured rounds.
pub const REPORT_EVERY: u32 = 3;

/// Pause before each timed pass, in milliseconds.
pub const PAUSE_MS_DEFAULT: u64 = 100;

// ── BenchConfig ──────────────────────────────────────────────────────────────

/// Runtime parameters for one comparison session.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Verbosity: 0 = silent, 1 = errors, 2 = results (default),
    /// 3 = per-pass timings, 4 = full information.
    pub display_level: u32,

    /// Bytes processed per timed pass (default [`TARGET_BYTES_DEFAULT`]).
    pub target_bytes: usize,

    /// Warm-up rounds excluded from the totals.
    pub warmup_rounds: u32,

    /// Measured rounds after warm-up.
    pub rounds: u32,

    /// Sleep before each timed pass, in milliseconds.
    pub pause_ms: u64,

    /// Cases to run, round-robin, in this order.
    pub cases: Vec<BenchCase>,

    /// Block size used by the streaming cases.
    pub block_size: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            display_level: 2,
            target_bytes: TARGET_BYTES_DEFAULT,
            warmup_rounds: WARMUP_ROUNDS_DEFAULT,
            rounds: ROUNDS_DEFAULT,
            pause_ms: PAUSE_MS_DEFAULT,
            cases: BenchCase::ALL.to_vec(),
            block_size: crate::config::BLOCK_SIZE_DEFAULT,
        }
    }
}

impl BenchConfig {
    // ── Setters ───────────────────────────────────────────────────────────────

    pub fn set_notification_level(&mut self, level: u32) -> &mut Self {
        self.display_level = level;
        self
    }

    /// Set the number of bytes each timed pass should process.
    /// The repetition count is `max(1, target_bytes / input_len)`.
    pub fn set_target_bytes(&mut self, target_bytes: usize) -> &mut Self {
        self.target_bytes = target_bytes;
        self
    }

    pub fn set_warmup_rounds(&mut self, rounds: u32) -> &mut Self {
        self.warmup_rounds = rounds;
        self
    }

    pub fn set_rounds(&mut self, rounds: u32) -> &mut Self {
        self.rounds = rounds;
        self
    }

    pub fn set_pause_ms(&mut self, pause_ms: u64) -> &mut Self {
        self.pause_ms = pause_ms;
        self
    }

    /// Replace the case list.  An empty list runs nothing but validation.
    pub fn set_cases(&mut self, cases: &[BenchCase]) -> &mut Self {
        self.cases = cases.to_vec();
        self
    }

    /// Set the block size used by the streaming cases (clamped to
    /// 1..=65535 when the writer is built).
    pub fn set_block_size(&mut self, block_size: usize) -> &mut Self {
        self.block_size = block_size;
        self
    }

    /// Repetitions per timed pass for an input of `input_len` bytes.
    pub fn repetitions_for(&self, input_len: usize) -> usize {
        if input_len == 0 {
            return 1;
        }
        (self.target_bytes / input_len).max(1)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
