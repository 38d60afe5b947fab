//! Command-line interface for the `lzf` binary.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program identity, size multipliers, `DISPLAY_LEVEL` and the display macros. |
//! | [`args`]      | `clap` definition: global -v/-q, `compress`, `decompress`, `test`, `bench`. |
//! | [`ops`]       | File-level operations: name resolution, overwrite policy, mtime carry-over. |
//!
//! Typical call sequence: `Cli::parse` → `set_display_level` → [`run`].

pub mod args;
pub mod constants;
pub mod ops;

use anyhow::{Context, Result};

use crate::bench::{bench_file, BenchConfig};
use crate::codec::Strategy;
use crate::displaylevel;
use args::{Cli, Cmd};
use ops::{compressed_name, decompressed_name, resolve_destination, CompressOptions};

/// Execute the parsed command.
pub fn run(cli: Cli) -> Result<()> {
    displaylevel!(
        3,
        "*** {} v{} {}-bit ***\n",
        constants::COMPRESSOR_NAME,
        crate::LZF_VERSION_STRING,
        usize::BITS
    );

    match cli.command {
        Cmd::Compress(a) => {
            let dst = resolve_destination(&a.input, a.output.output.as_deref(), a.output.stdout, compressed_name);
            let opts = CompressOptions {
                block_size: a.block_size,
                strategy: Strategy::from(a.strategy),
                workers: a.workers as usize,
                force: a.output.force,
            };
            ops::compress_file(&a.input, &dst, &opts)?;
        }
        Cmd::Decompress(a) => {
            let dst = resolve_destination(&a.input, a.output.output.as_deref(), a.output.stdout, decompressed_name);
            ops::decompress_file(&a.input, &dst, Strategy::from(a.strategy), a.output.force)?;
        }
        Cmd::Test(a) => {
            for input in &a.inputs {
                ops::test_file(input, Strategy::optimal())?;
            }
        }
        Cmd::Bench(a) => {
            let mut config = BenchConfig::default();
            config
                .set_notification_level(constants::display_level())
                .set_rounds(a.rounds)
                .set_warmup_rounds(a.warmup)
                .set_pause_ms(a.pause_ms);
            if let Some(target) = a.target_bytes {
                config.set_target_bytes(target as usize);
            }
            bench_file(&a.input, &config).with_context(|| format!("{}: benchmark failed", a.input.display()))?;
        }
    }
    Ok(())
}
