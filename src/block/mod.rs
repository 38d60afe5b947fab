//! LZF token-stream compression and decompression.
//!
//! This module contains the per-chunk engine: the match finder and two
//! interchangeable encoders and decoders (portable and optimized).  Chunk
//! framing lives in [`crate::chunk`]; strategy selection in [`crate::codec`].

pub mod compress;
pub mod compress_fast;
pub mod decompress_core;
pub mod match_finder;
pub mod types;

pub use compress::{compress_block, max_token_len};
pub use compress_fast::compress_block_fast;
pub use decompress_core::{decompress_block, decompress_block_fast};
pub use match_finder::{Match, MatchFinder};
pub use types::{MAX_LITERAL, MAX_OFF, MAX_REF, MIN_BLOCK_TO_COMPRESS, MIN_MATCH};
