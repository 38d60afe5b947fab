// lzfr: LZF block codec, streaming adapters, and the lzf tool

pub mod timefn;
pub mod config;
pub mod chunk;
pub mod block;
pub mod codec;
pub mod stream;
pub mod bench;
pub mod cli;

// ── Version constants ─────────────────────────────────────────────────────────
pub const LZF_VERSION_MAJOR: u32 = 1;
pub const LZF_VERSION_MINOR: u32 = 0;
pub const LZF_VERSION_RELEASE: u32 = 0;
pub const LZF_VERSION_NUMBER: u32 =
    LZF_VERSION_MAJOR * 100 * 100 + LZF_VERSION_MINOR * 100 + LZF_VERSION_RELEASE;
pub const LZF_VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version number (`major * 10000 + minor * 100 + release`).
pub fn version_number() -> u32 {
    LZF_VERSION_NUMBER
}

pub fn version_string() -> &'static str {
    LZF_VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use chunk::{compress_bound, decoded_len, ChunkHeader, ChunkType, LzfError, MAX_CHUNK_LEN};
pub use codec::{decode, decode_with, encode, encode_with, ChunkDecoder, ChunkEncoder, Strategy};
pub use stream::{
    encode_parallel, DataHandler, LzfReader, LzfWriter, ParallelLzfWriter, Uncompressor,
};
