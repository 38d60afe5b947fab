//! LZF chunk framing: the header layout every other layer builds on.
//!
//! A stream is a plain concatenation of chunks.  Each chunk is a 5-byte
//! (raw) or 7-byte (compressed) header followed by its payload; there is no
//! stream header, trailer, or separator.

pub mod header;
pub mod types;

pub use header::{compress_bound, decoded_len, parse_header, write_header};
pub use types::{
    ChunkHeader, ChunkType, LzfError, HEADER_LEN_COMPRESSED, HEADER_LEN_RAW, LZF_MAGIC,
    MAX_CHUNK_LEN,
};
