// timefn - monotonic timing helpers for the perf-comparison harness.
//
// Thin wrappers over std::time::Instant: the harness only ever needs
// "now" and "nanoseconds since".

use std::time::{Duration, Instant};

/// Nanosecond duration.
pub type DurationNs = u64;

/// Opaque timestamp.  Only meaningful relative to another `TimeT`.
#[derive(Clone, Copy, Debug)]
pub struct TimeT {
    t: Instant,
}

impl TimeT {
    pub fn now() -> Self {
        TimeT { t: Instant::now() }
    }
}

impl Default for TimeT {
    fn default() -> Self {
        TimeT::now()
    }
}

/// Nanoseconds between two timestamps (0 if `end` precedes `start`).
pub fn span_ns(start: TimeT, end: TimeT) -> DurationNs {
    end.t.saturating_duration_since(start.t).as_nanos() as DurationNs
}

/// Nanoseconds elapsed since `start`.
pub fn clock_span_ns(start: TimeT) -> DurationNs {
    start.t.elapsed().as_nanos() as DurationNs
}

/// Busy-wait until the clock visibly advances, so a measurement starts on a
/// fresh tick.
pub fn wait_for_next_tick() {
    let start = TimeT::now();
    while span_ns(start, TimeT::now()) == 0 {}
}

/// Nanoseconds as fractional milliseconds.
#[inline]
pub fn ns_to_ms(ns: DurationNs) -> f64 {
    ns as f64 / 1_000_000.0
}

/// Sleep for `ms` milliseconds; no-op for 0.
pub fn pause_ms(ms: u64) {
    if ms > 0 {
        std::thread::sleep(Duration::from_millis(ms));
    }
}
