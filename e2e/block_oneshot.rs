//! E2E Test Suite 01: One-Shot Encode / Decode
//!
//! Exercises the crate-root `encode` / `decode` pair on the sizes and data
//! shapes that matter for chunk splitting:
//! - empty, tiny, and boundary-length inputs
//! - incompressible data (raw fallback, bounded expansion)
//! - highly compressible data (compressed chunks)
//! - an input spanning exactly three chunks

extern crate lzf;

use lzf::chunk::{parse_header, ChunkType, HEADER_LEN_RAW};
use lzf::{compress_bound, decode, encode, MAX_CHUNK_LEN};

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// xorshift noise; LZF finds no 3-byte repeats worth keeping.
fn noise(len: usize, seed: u64) -> Vec<u8> {
    let mut x = seed | 1;
    (0..len)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            (x >> 32) as u8
        })
        .collect()
}

fn text(len: usize) -> Vec<u8> {
    b"Lorem ipsum dolor sit amet, consectetur adipiscing elit. "
        .iter()
        .cycle()
        .take(len)
        .copied()
        .collect()
}

fn chunk_types(encoded: &[u8]) -> Vec<(ChunkType, usize)> {
    let mut out = Vec::new();
    let mut off = 0;
    while off < encoded.len() {
        let (h, _) = parse_header(encoded, off).expect("valid header");
        out.push((h.chunk_type, h.original_len));
        off += h.chunk_len();
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: round trip across boundary sizes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_roundtrip_boundary_sizes() {
    for &len in &[0usize, 1, 3, 15, 16, 17, 4096, 65_534, 65_535, 65_536, 200_000] {
        for data in [text(len), noise(len, len as u64)] {
            let encoded = encode(&data);
            assert_eq!(decode(&encoded).expect("decode"), data, "len {len}");
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: incompressible input falls back to raw chunks
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_incompressible_input_is_stored_raw() {
    let data = noise(150_000, 42);
    let encoded = encode(&data);
    let chunks = chunk_types(&encoded);
    assert_eq!(chunks.len(), 3);
    assert!(chunks.iter().all(|&(t, _)| t == ChunkType::Raw));
    assert_eq!(encoded.len(), data.len() + 3 * HEADER_LEN_RAW);
    assert!(encoded.len() <= compress_bound(data.len()));
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: compressible input shrinks
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_compressible_input_shrinks() {
    let data = text(100_000);
    let encoded = encode(&data);
    assert!(encoded.len() * 10 < data.len(), "{} bytes", encoded.len());
    assert!(chunk_types(&encoded).iter().all(|&(t, _)| t == ChunkType::Compressed));
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: exactly three chunks for 2 × 65535 + 10 bytes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_three_chunk_split() {
    let data = text(MAX_CHUNK_LEN * 2 + 10);
    let encoded = encode(&data);
    let lens: Vec<usize> = chunk_types(&encoded).iter().map(|&(_, n)| n).collect();
    assert_eq!(lens, [MAX_CHUNK_LEN, MAX_CHUNK_LEN, 10]);
    assert_eq!(decode(&encoded).unwrap(), data);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: short chunks are never compressed
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_short_chunk_is_raw() {
    let data = [b'z'; 15];
    let encoded = encode(&data);
    assert_eq!(chunk_types(&encoded), [(ChunkType::Raw, 15)]);
    assert_eq!(&encoded[HEADER_LEN_RAW..], &data);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 6: concatenated encodings decode as one stream
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_concatenation() {
    let a = text(70_000);
    let b = noise(3000, 9);
    let mut joined = encode(&a);
    joined.extend_from_slice(&encode(&b));
    let mut want = a.clone();
    want.extend_from_slice(&b);
    assert_eq!(decode(&joined).unwrap(), want);
}
