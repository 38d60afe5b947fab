// main.rs: entry point for the `lzf` binary.

use clap::Parser;

use lzf::cli::args::Cli;
use lzf::cli::constants::{set_display_level, COMPRESSOR_NAME};
use lzf::displaylevel;

fn main() {
    let cli = Cli::parse();
    set_display_level(cli.display_level());

    if let Err(e) = lzf::cli::run(cli) {
        displaylevel!(1, "{}: {:#}\n", COMPRESSOR_NAME, e);
        std::process::exit(1);
    }
}
