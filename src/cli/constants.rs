// cli/constants.rs: Program identity, size multipliers, and the display
// infrastructure shared by the CLI, the perf harness, and the streaming
// adapters.

use std::sync::atomic::{AtomicU32, Ordering};

// ── Identity ──────────────────────────────────────────────────────────────────
pub const COMPRESSOR_NAME: &str = "lzf";

/// Input/output sentinel meaning stdin or stdout.
pub const STDIO_MARK: &str = "-";

// ── Size multipliers ──────────────────────────────────────────────────────────
pub const KB: usize = 1 << 10;
pub const MB: usize = 1 << 20;

// ── Display level ─────────────────────────────────────────────────────────────
//
// 0 = no output; 1 = errors only; 2 = results (default); 3 = progress;
// 4 = verbose (per-chunk traces from the streaming adapters).
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

// ── Display macros ────────────────────────────────────────────────────────────

/// Print to stdout.
#[macro_export]
macro_rules! displayout {
    ($($arg:tt)*) => { print!($($arg)*) };
}

/// Print to stderr.
#[macro_export]
macro_rules! display {
    ($($arg:tt)*) => { eprint!($($arg)*) };
}

/// Print to stderr when the display level is at least `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}
