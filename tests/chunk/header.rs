// Integration tests for chunk/header.rs: header layout, parsing, and the
// header-only size scan.

use lzf::chunk::header::{read_be16, write_be16};
use lzf::chunk::{
    compress_bound, decoded_len, parse_header, write_header, ChunkHeader, ChunkType, LzfError,
    HEADER_LEN_COMPRESSED, HEADER_LEN_RAW, MAX_CHUNK_LEN,
};

// ─────────────────────────────────────────────────────────────────────────────
// Header layout
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn raw_header_layout() {
    let mut out = Vec::new();
    write_header(&mut out, &ChunkHeader::raw(0x1234));
    assert_eq!(out, [b'Z', b'V', 0, 0x12, 0x34]);
    assert_eq!(out.len(), HEADER_LEN_RAW);
}

#[test]
fn compressed_header_layout() {
    let mut out = Vec::new();
    write_header(&mut out, &ChunkHeader::compressed(1000, 21));
    assert_eq!(out, [b'Z', b'V', 1, 0x03, 0xE8, 0x00, 0x15]);
    assert_eq!(out.len(), HEADER_LEN_COMPRESSED);
}

#[test]
fn header_appends_to_existing_output() {
    let mut out = vec![0xAA];
    write_header(&mut out, &ChunkHeader::raw(1));
    assert_eq!(out, [0xAA, b'Z', b'V', 0, 0, 1]);
}

#[test]
fn be16_helpers() {
    let mut out = Vec::new();
    write_be16(&mut out, 0xBEEF);
    assert_eq!(out, [0xBE, 0xEF]);
    assert_eq!(read_be16(&[0, 0xBE, 0xEF], 1), 0xBEEF);
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn parse_written_headers() {
    for header in [ChunkHeader::raw(1), ChunkHeader::raw(MAX_CHUNK_LEN), ChunkHeader::compressed(300, 40)] {
        let mut out = vec![9, 9];
        write_header(&mut out, &header);
        let (parsed, len) = parse_header(&out, 2).unwrap();
        assert_eq!(parsed, header);
        assert_eq!(len, header.header_len());
    }
}

#[test]
fn parse_rejects_bad_magic() {
    assert_eq!(parse_header(b"ZX\x00\x00\x01", 0), Err(LzfError::MalformedChunk));
    assert_eq!(parse_header(b"Q", 0), Err(LzfError::MalformedChunk));
}

#[test]
fn parse_rejects_unknown_type() {
    assert_eq!(parse_header(b"ZV\x02\x00\x01", 0), Err(LzfError::MalformedChunk));
}

#[test]
fn parse_rejects_zero_lengths() {
    assert_eq!(parse_header(b"ZV\x00\x00\x00", 0), Err(LzfError::MalformedChunk));
    assert_eq!(parse_header(b"ZV\x01\x00\x10\x00\x00", 0), Err(LzfError::MalformedChunk));
}

#[test]
fn parse_rejects_compressed_longer_than_original() {
    assert_eq!(parse_header(b"ZV\x01\x00\x10\x00\x11", 0), Err(LzfError::MalformedChunk));
}

#[test]
fn parse_short_headers_are_truncated() {
    assert_eq!(parse_header(b"", 0), Err(LzfError::TruncatedInput));
    assert_eq!(parse_header(b"Z", 0), Err(LzfError::TruncatedInput));
    assert_eq!(parse_header(b"ZV\x00\x00", 0), Err(LzfError::TruncatedInput));
    assert_eq!(parse_header(b"ZV\x01\x00\x10\x00", 0), Err(LzfError::TruncatedInput));
}

// ─────────────────────────────────────────────────────────────────────────────
// Size utilities
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn decoded_len_sums_chunks() {
    let mut src = Vec::new();
    write_header(&mut src, &ChunkHeader::raw(3));
    src.extend_from_slice(b"abc");
    write_header(&mut src, &ChunkHeader::compressed(1000, 2));
    src.extend_from_slice(&[0, b'x']);
    assert_eq!(decoded_len(&src), Ok(1003));
    assert_eq!(decoded_len(&[]), Ok(0));
}

#[test]
fn decoded_len_detects_short_payload() {
    let mut src = Vec::new();
    write_header(&mut src, &ChunkHeader::raw(3));
    src.extend_from_slice(b"ab");
    assert_eq!(decoded_len(&src), Err(LzfError::TruncatedInput));
}

#[test]
fn compress_bound_counts_one_header_per_chunk() {
    assert_eq!(compress_bound(0), 0);
    assert_eq!(compress_bound(1), 1 + HEADER_LEN_RAW);
    assert_eq!(compress_bound(MAX_CHUNK_LEN), MAX_CHUNK_LEN + HEADER_LEN_RAW);
    assert_eq!(compress_bound(MAX_CHUNK_LEN + 1), MAX_CHUNK_LEN + 1 + 2 * HEADER_LEN_RAW);
}

#[test]
fn chunk_type_tags() {
    assert_eq!(ChunkType::from_u8(0), Some(ChunkType::Raw));
    assert_eq!(ChunkType::from_u8(1), Some(ChunkType::Compressed));
    assert_eq!(ChunkType::from_u8(7), None);
}
