// config.rs: Compile-time configuration defaults for the lzf tool and the
// streaming adapters.
//
// Runtime overrides come from command-line flags (see cli::args); nothing
// here is read from the environment.

// Default streaming block size in bytes.
// Equal to the largest chunk the format can describe, so the default writer
// output matches the one-shot encoder byte-for-byte.
// Can be overridden with the -B command-line flag.
pub const BLOCK_SIZE_DEFAULT: usize = crate::chunk::MAX_CHUNK_LEN;

// Smallest block size accepted on the command line.
pub const BLOCK_SIZE_MIN: usize = 1;

// Default number of encoder worker threads (0 = one per logical CPU).
// Can be overridden with the -T command-line flag.
pub const NB_WORKERS_DEFAULT: usize = 0;

// Maximum number of encoder worker threads selectable at runtime.
pub const NB_WORKERS_MAX: usize = 200;

// Extension appended to compressed files and stripped on decompression.
pub const LZF_EXTENSION: &str = ".lzf";

// Extension appended on decompression when the input lacks LZF_EXTENSION.
pub const DECODED_EXTENSION: &str = ".out";

// I/O buffer size used by the file operations.
pub const IO_BUFFER_SIZE: usize = 1 << 20;
