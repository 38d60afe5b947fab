//! Chunk header encoding and parsing, plus the header-only size scan.
//!
//! Covers:
//! - BE read/write helpers (`read_be16`, `write_be16`)
//! - [`write_header`]: append a fixed-width header to an output buffer
//! - [`parse_header`]: validate and decode the header at an offset
//! - [`decoded_len`]: total decompressed size of a run of chunks
//! - [`compress_bound`]: worst-case encoded size for an input length

use crate::chunk::types::{
    ChunkHeader, ChunkType, LzfError, HEADER_LEN_RAW, HEADER_PREFIX_LEN, LZF_MAGIC,
    MAX_CHUNK_LEN,
};

// ─────────────────────────────────────────────────────────────────────────────
// Byte-order helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Read a big-endian `u16` from `src` at byte `offset`.
#[inline]
pub fn read_be16(src: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([src[offset], src[offset + 1]])
}

/// Append a big-endian `u16` to `dst`.
#[inline]
pub fn write_be16(dst: &mut Vec<u8>, value: u16) {
    dst.extend_from_slice(&value.to_be_bytes());
}

// ─────────────────────────────────────────────────────────────────────────────
// Header encoding
// ─────────────────────────────────────────────────────────────────────────────

/// Append the encoded form of `header` to `dst`.
///
/// Layout: `'Z' 'V' type original_len:be16 [compressed_len:be16]`.
///
/// The encoder only ever builds headers with lengths in `1..=MAX_CHUNK_LEN`;
/// out-of-range values are a caller bug and trip a debug assertion.
pub fn write_header(dst: &mut Vec<u8>, header: &ChunkHeader) {
    debug_assert!(header.original_len >= 1 && header.original_len <= MAX_CHUNK_LEN);
    dst.extend_from_slice(&LZF_MAGIC);
    dst.push(header.chunk_type as u8);
    write_be16(dst, header.original_len as u16);
    if let Some(compressed_len) = header.compressed_len {
        debug_assert!(compressed_len >= 1 && compressed_len <= header.original_len);
        write_be16(dst, compressed_len as u16);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Header parsing
// ─────────────────────────────────────────────────────────────────────────────

/// Parse the chunk header starting at `src[offset..]`.
///
/// Returns the header and its encoded size.  Only the header bytes are
/// examined; the caller checks that the payload is present.
///
/// # Errors
/// - [`LzfError::TruncatedInput`] if fewer bytes remain than the header needs.
/// - [`LzfError::MalformedChunk`] on a magic mismatch, an unknown type tag,
///   a zero length, or a compressed length larger than the original length.
pub fn parse_header(src: &[u8], offset: usize) -> Result<(ChunkHeader, usize), LzfError> {
    let avail = src.len().saturating_sub(offset);
    if avail < HEADER_PREFIX_LEN {
        // A short tail that already disagrees with the marker is not a chunk
        // at all, truncated or otherwise.
        let seen = &src[offset.min(src.len())..];
        if seen.iter().zip(LZF_MAGIC.iter()).any(|(a, b)| a != b) {
            return Err(LzfError::MalformedChunk);
        }
        return Err(LzfError::TruncatedInput);
    }
    if src[offset..offset + 2] != LZF_MAGIC {
        return Err(LzfError::MalformedChunk);
    }
    let chunk_type = ChunkType::from_u8(src[offset + 2]).ok_or(LzfError::MalformedChunk)?;
    let header_len = chunk_type.header_len();
    if avail < header_len {
        return Err(LzfError::TruncatedInput);
    }

    let original_len = read_be16(src, offset + 3) as usize;
    if original_len == 0 {
        return Err(LzfError::MalformedChunk);
    }

    let header = match chunk_type {
        ChunkType::Raw => ChunkHeader::raw(original_len),
        ChunkType::Compressed => {
            let compressed_len = read_be16(src, offset + HEADER_LEN_RAW) as usize;
            if compressed_len == 0 || compressed_len > original_len {
                return Err(LzfError::MalformedChunk);
            }
            ChunkHeader::compressed(original_len, compressed_len)
        }
    };
    Ok((header, header_len))
}

/// Error for input that ends after `seen`, a strict prefix of a header.
/// Bytes that already disagree with the magic make it malformed rather than
/// truncated, matching [`parse_header`].
pub(crate) fn short_header_error(seen: &[u8]) -> LzfError {
    match parse_header(seen, 0) {
        Err(e) => e,
        Ok(_) => LzfError::TruncatedInput,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Size utilities
// ─────────────────────────────────────────────────────────────────────────────

/// Total decompressed size of the concatenated chunks in `src`.
///
/// Walks headers only; payloads are skipped, not decoded, so token-level
/// corruption inside a payload is not detected here.
///
/// # Errors
/// Any header error from [`parse_header`], or [`LzfError::TruncatedInput`]
/// if the last payload is cut short.
pub fn decoded_len(src: &[u8]) -> Result<usize, LzfError> {
    let mut offset = 0usize;
    let mut total = 0usize;
    while offset < src.len() {
        let (header, header_len) = parse_header(src, offset)?;
        let end = offset + header_len + header.payload_len();
        if end > src.len() {
            return Err(LzfError::TruncatedInput);
        }
        total += header.original_len;
        offset = end;
    }
    Ok(total)
}

/// Worst-case encoded size for `input_len` bytes.
///
/// Every chunk is at worst stored raw, so the bound is the input length plus
/// one raw header per chunk.  An empty input encodes to nothing.
#[inline]
pub fn compress_bound(input_len: usize) -> usize {
    let chunks = input_len.div_ceil(MAX_CHUNK_LEN);
    input_len + chunks * HEADER_LEN_RAW
}
