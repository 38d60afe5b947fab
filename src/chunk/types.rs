//! LZF chunk format types, constants, and error handling.
//!
//! Covers:
//! - Framing constants (magic marker, header sizes, per-chunk ceiling)
//! - [`ChunkType`]: the one-byte type tag that follows the magic marker
//! - [`ChunkHeader`]: a parsed or to-be-written header
//! - [`LzfError`]: the error kinds shared by every layer of the codec

use core::fmt;
use std::io;

// ─────────────────────────────────────────────────────────────────────────────
// Format constants
// ─────────────────────────────────────────────────────────────────────────────

/// Two-byte marker that opens every chunk.
pub const LZF_MAGIC: [u8; 2] = [b'Z', b'V'];

/// Header size of a raw (stored) chunk: magic + type + original length.
pub const HEADER_LEN_RAW: usize = 5;

/// Header size of a compressed chunk: raw header + compressed length.
pub const HEADER_LEN_COMPRESSED: usize = 7;

/// Bytes needed before the type tag, and therefore the header size, is known.
pub const HEADER_PREFIX_LEN: usize = 3;

/// Largest number of decompressed bytes a single chunk may describe.
/// Both length fields are 16-bit, so this is also the largest payload.
pub const MAX_CHUNK_LEN: usize = 0xFFFF;

/// Difference in header size between a compressed and a raw chunk.
/// A compressed chunk must save more than this to be worth emitting.
pub const COMPRESSED_HEADER_SURPLUS: usize = HEADER_LEN_COMPRESSED - HEADER_LEN_RAW;

// ─────────────────────────────────────────────────────────────────────────────
// Chunk type tag
// ─────────────────────────────────────────────────────────────────────────────

/// Type tag stored in the third header byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ChunkType {
    /// Payload is the original bytes, stored verbatim.
    Raw = 0,
    /// Payload is an LZF token stream.
    Compressed = 1,
}

impl ChunkType {
    /// Decode a type tag, or `None` for an unrecognised value.
    #[inline]
    pub fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(ChunkType::Raw),
            1 => Some(ChunkType::Compressed),
            _ => None,
        }
    }

    /// Header size for chunks of this type.
    #[inline]
    pub fn header_len(self) -> usize {
        match self {
            ChunkType::Raw => HEADER_LEN_RAW,
            ChunkType::Compressed => HEADER_LEN_COMPRESSED,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Chunk header
// ─────────────────────────────────────────────────────────────────────────────

/// Decoded chunk header.
///
/// `compressed_len` is `Some` exactly when `chunk_type` is
/// [`ChunkType::Compressed`]; use the constructors to keep that in sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    pub chunk_type: ChunkType,
    /// Number of bytes this chunk decodes to (1..=65535).
    pub original_len: usize,
    /// Token-stream length for compressed chunks.
    pub compressed_len: Option<usize>,
}

impl ChunkHeader {
    /// Header for a stored chunk of `len` bytes.
    pub fn raw(len: usize) -> Self {
        ChunkHeader {
            chunk_type: ChunkType::Raw,
            original_len: len,
            compressed_len: None,
        }
    }

    /// Header for a compressed chunk decoding to `original_len` bytes from a
    /// `compressed_len`-byte token stream.
    pub fn compressed(original_len: usize, compressed_len: usize) -> Self {
        ChunkHeader {
            chunk_type: ChunkType::Compressed,
            original_len,
            compressed_len: Some(compressed_len),
        }
    }

    /// Size of the encoded header in bytes.
    #[inline]
    pub fn header_len(&self) -> usize {
        self.chunk_type.header_len()
    }

    /// Size of the payload that follows the header.
    #[inline]
    pub fn payload_len(&self) -> usize {
        self.compressed_len.unwrap_or(self.original_len)
    }

    /// Header plus payload: the number of input bytes this chunk occupies.
    #[inline]
    pub fn chunk_len(&self) -> usize {
        self.header_len() + self.payload_len()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Errors produced by the LZF codec and its streaming adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LzfError {
    /// Magic mismatch, unknown type tag, an invalid length field, or a token
    /// stream that disagrees with the lengths declared in its header.
    MalformedChunk,
    /// A chunk header or payload extends beyond the available input.
    TruncatedInput,
    /// A backreference points before the first byte decoded for the chunk.
    InvalidBackreference,
    /// A streaming adapter was used after `close()`.
    StreamClosed,
    /// A streaming adapter was configured with a block size outside
    /// `1..=MAX_CHUNK_LEN`.
    InvalidBlockSize(usize),
}

impl LzfError {
    /// Short, stable name of the error kind.
    pub fn error_name(&self) -> &'static str {
        match self {
            LzfError::MalformedChunk => "ERROR_malformedChunk",
            LzfError::TruncatedInput => "ERROR_truncatedInput",
            LzfError::InvalidBackreference => "ERROR_invalidBackreference",
            LzfError::StreamClosed => "ERROR_streamClosed",
            LzfError::InvalidBlockSize(_) => "ERROR_invalidBlockSize",
        }
    }

    /// `io::ErrorKind` used when this error crosses an `io::Read`/`io::Write`
    /// boundary.
    pub fn io_kind(&self) -> io::ErrorKind {
        match self {
            LzfError::MalformedChunk | LzfError::InvalidBackreference => {
                io::ErrorKind::InvalidData
            }
            LzfError::TruncatedInput => io::ErrorKind::UnexpectedEof,
            LzfError::StreamClosed => io::ErrorKind::Other,
            LzfError::InvalidBlockSize(_) => io::ErrorKind::InvalidInput,
        }
    }

    /// Recover the codec error carried by an `io::Error` produced by the
    /// streaming adapters.
    pub fn from_io(err: &io::Error) -> Option<LzfError> {
        err.get_ref()
            .and_then(|inner| inner.downcast_ref::<LzfError>())
            .copied()
    }
}

impl fmt::Display for LzfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LzfError::MalformedChunk => f.write_str("malformed LZF chunk"),
            LzfError::TruncatedInput => f.write_str("truncated LZF input"),
            LzfError::InvalidBackreference => {
                f.write_str("LZF backreference points before start of output")
            }
            LzfError::StreamClosed => f.write_str("LZF stream already closed"),
            LzfError::InvalidBlockSize(size) => write!(
                f,
                "invalid LZF block size {} (expected 1..={})",
                size, MAX_CHUNK_LEN
            ),
        }
    }
}

impl std::error::Error for LzfError {}

impl From<LzfError> for io::Error {
    fn from(err: LzfError) -> Self {
        io::Error::new(err.io_kind(), err)
    }
}
