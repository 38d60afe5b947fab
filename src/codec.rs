//! Whole-buffer LZF encode/decode with a selectable implementation.
//!
//! A buffer is encoded as consecutive chunks of at most
//! [`MAX_CHUNK_LEN`] input bytes.  Each chunk is stored compressed only
//! when that is strictly smaller than storing it raw.  Decoding walks the
//! chunks in order until the input is exhausted.
//!
//! Two implementations back each direction, selected by [`Strategy`].  They
//! are interchangeable: for the same input they produce the same bytes and
//! report the same [`LzfError`].

use core::fmt;
use core::str::FromStr;

use crate::block::{
    compress_block, compress_block_fast, decompress_block, decompress_block_fast, MatchFinder,
    MIN_BLOCK_TO_COMPRESS,
};
use crate::chunk::types::COMPRESSED_HEADER_SURPLUS;
use crate::chunk::{
    compress_bound, parse_header, write_header, ChunkHeader, ChunkType, LzfError, MAX_CHUNK_LEN,
};

// ─────────────────────────────────────────────────────────────────────────────
// Strategy
// ─────────────────────────────────────────────────────────────────────────────

/// Which encoder/decoder implementation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// Bounds-checked slice indexing throughout.
    Portable,
    /// Raw-pointer loops with word-at-a-time match extension.
    #[default]
    Optimized,
}

impl Strategy {
    /// Every strategy, in declaration order.
    pub const ALL: [Strategy; 2] = [Strategy::Portable, Strategy::Optimized];

    /// Fastest implementation available on this build.
    #[inline]
    pub fn optimal() -> Self {
        Strategy::Optimized
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Portable => "portable",
            Strategy::Optimized => "optimized",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "portable" | "safe" => Ok(Strategy::Portable),
            "optimized" | "fast" => Ok(Strategy::Optimized),
            other => Err(format!("unknown strategy '{}' (expected portable|optimized)", other)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Encoder
// ─────────────────────────────────────────────────────────────────────────────

/// Reusable chunk encoder.
///
/// Holds the match-finder table and a token scratch buffer so repeated
/// calls do not reallocate.  Output depends only on the input bytes: no
/// state from a previous call influences the next one.
#[derive(Debug, Clone)]
pub struct ChunkEncoder {
    strategy: Strategy,
    finder: MatchFinder,
    scratch: Vec<u8>,
}

impl ChunkEncoder {
    pub fn new(strategy: Strategy) -> Self {
        ChunkEncoder {
            strategy,
            finder: MatchFinder::new(),
            scratch: Vec::new(),
        }
    }

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Append one framed chunk for `chunk` to `dst` and return the number of
    /// bytes appended.  An empty `chunk` appends nothing; one longer than
    /// [`MAX_CHUNK_LEN`] is split as [`ChunkEncoder::encode_into`] does.
    pub fn encode_chunk(&mut self, chunk: &[u8], dst: &mut Vec<u8>) -> usize {
        let start = dst.len();
        if chunk.is_empty() {
            return 0;
        }
        if chunk.len() > MAX_CHUNK_LEN {
            self.encode_into(chunk, dst);
            return dst.len() - start;
        }

        if chunk.len() >= MIN_BLOCK_TO_COMPRESS {
            self.scratch.clear();
            let token_len = match self.strategy {
                Strategy::Portable => compress_block(chunk, &mut self.finder, &mut self.scratch),
                Strategy::Optimized => {
                    compress_block_fast(chunk, &mut self.finder, &mut self.scratch)
                }
            };
            if token_len + COMPRESSED_HEADER_SURPLUS < chunk.len() {
                write_header(dst, &ChunkHeader::compressed(chunk.len(), token_len));
                dst.extend_from_slice(&self.scratch);
                return dst.len() - start;
            }
        }

        write_header(dst, &ChunkHeader::raw(chunk.len()));
        dst.extend_from_slice(chunk);
        dst.len() - start
    }

    /// Append the encoding of `input` to `dst`, splitting it into chunks of
    /// `block_size` bytes (clamped to 1..=[`MAX_CHUNK_LEN`]).
    pub fn encode_blocks_into(&mut self, input: &[u8], block_size: usize, dst: &mut Vec<u8>) {
        let block_size = block_size.clamp(1, MAX_CHUNK_LEN);
        dst.reserve(compress_bound(input.len()));
        for chunk in input.chunks(block_size) {
            self.encode_chunk(chunk, dst);
        }
    }

    /// Append the encoding of `input` to `dst`.
    pub fn encode_into(&mut self, input: &[u8], dst: &mut Vec<u8>) {
        self.encode_blocks_into(input, MAX_CHUNK_LEN, dst);
    }

    /// Encode `input` into a fresh buffer.  Empty input yields empty output.
    pub fn encode(&mut self, input: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_into(input, &mut out);
        out
    }
}

impl Default for ChunkEncoder {
    fn default() -> Self {
        ChunkEncoder::new(Strategy::optimal())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Decoder
// ─────────────────────────────────────────────────────────────────────────────

/// Stateless chunk decoder bound to one [`Strategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChunkDecoder {
    strategy: Strategy,
}

impl ChunkDecoder {
    pub fn new(strategy: Strategy) -> Self {
        ChunkDecoder { strategy }
    }

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Decode one chunk whose header has already been parsed.  `payload`
    /// must be exactly `header.payload_len()` bytes.
    pub fn decode_chunk(
        &self,
        header: &ChunkHeader,
        payload: &[u8],
        dst: &mut Vec<u8>,
    ) -> Result<(), LzfError> {
        debug_assert_eq!(payload.len(), header.payload_len());
        match header.chunk_type {
            ChunkType::Raw => {
                dst.extend_from_slice(payload);
                Ok(())
            }
            ChunkType::Compressed => match self.strategy {
                Strategy::Portable => decompress_block(payload, dst, header.original_len),
                Strategy::Optimized => decompress_block_fast(payload, dst, header.original_len),
            },
        }
    }

    /// Decode every chunk in `src`, appending the output to `dst`.
    ///
    /// On error `dst` is restored to its length on entry.
    pub fn decode_into(&self, src: &[u8], dst: &mut Vec<u8>) -> Result<(), LzfError> {
        let base = dst.len();
        let result = self.decode_chunks(src, dst);
        if result.is_err() {
            dst.truncate(base);
        }
        result
    }

    fn decode_chunks(&self, src: &[u8], dst: &mut Vec<u8>) -> Result<(), LzfError> {
        let mut pos = 0usize;
        while pos < src.len() {
            let (header, header_len) = parse_header(src, pos)?;
            let payload_start = pos + header_len;
            let payload_end = payload_start + header.payload_len();
            if payload_end > src.len() {
                return Err(LzfError::TruncatedInput);
            }
            self.decode_chunk(&header, &src[payload_start..payload_end], dst)?;
            pos = payload_end;
        }
        Ok(())
    }

    /// Decode `src` into a fresh buffer.
    pub fn decode(&self, src: &[u8]) -> Result<Vec<u8>, LzfError> {
        let mut out = Vec::new();
        self.decode_into(src, &mut out)?;
        Ok(out)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// One-shot API
// ─────────────────────────────────────────────────────────────────────────────

/// Encode `input` with [`Strategy::optimal`].
pub fn encode(input: &[u8]) -> Vec<u8> {
    encode_with(Strategy::optimal(), input)
}

/// Encode `input` with the given implementation.
pub fn encode_with(strategy: Strategy, input: &[u8]) -> Vec<u8> {
    ChunkEncoder::new(strategy).encode(input)
}

/// Decode a concatenation of LZF chunks with [`Strategy::optimal`].
pub fn decode(encoded: &[u8]) -> Result<Vec<u8>, LzfError> {
    decode_with(Strategy::optimal(), encoded)
}

/// Decode a concatenation of LZF chunks with the given implementation.
pub fn decode_with(strategy: Strategy, encoded: &[u8]) -> Result<Vec<u8>, LzfError> {
    ChunkDecoder::new(strategy).decode(encoded)
}
