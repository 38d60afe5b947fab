//! Perf comparison between the codec implementations.
//!
//! [`bench_file`] is the entry point used by `lzf bench`: it loads a file and
//! hands it to [`run_comparison`], which first checks that the portable and
//! optimized paths agree ([`pre_validate`]) and then times each
//! [`BenchCase`] round-robin.
//!
//! [`BenchConfig`] controls verbosity, repetition target, warm-up and
//! measured rounds, pauses, and the case list.

pub mod cases;
pub mod config;
pub mod runner;

pub use cases::{BenchCase, CaseRunner, CountingSink};
pub use config::BenchConfig;
pub use runner::{bench_file, pre_validate, run_comparison, BenchSummary, CaseResult};
