// Integration tests for block/decompress_core.rs: both decoders, valid and
// hostile token streams.

use lzf::block::{compress_block, decompress_block, decompress_block_fast, MatchFinder};
use lzf::LzfError;

type Decoder = fn(&[u8], &mut Vec<u8>, usize) -> Result<(), LzfError>;

const DECODERS: [(&str, Decoder); 2] = [("portable", decompress_block), ("fast", decompress_block_fast)];

fn each(src: &[u8], out_len: usize) -> Vec<(&'static str, Result<Vec<u8>, LzfError>)> {
    DECODERS
        .iter()
        .map(|&(name, f)| {
            let mut out = Vec::new();
            (name, f(src, &mut out, out_len).map(|_| out))
        })
        .collect()
}

#[test]
fn literal_only() {
    for (name, r) in each(&[2, b'x', b'y', b'z'], 3) {
        assert_eq!(r.as_deref(), Ok(&b"xyz"[..]), "{name}");
    }
}

#[test]
fn overlapping_backreference() {
    // "ab" then length 8 at distance 2.
    for (name, r) in each(&[1, b'a', b'b', 0xC0, 1], 10) {
        assert_eq!(r.as_deref(), Ok(&b"ababababab"[..]), "{name}");
    }
}

#[test]
fn extended_length_backreference() {
    // 'z' then length 7 + 100 + 2 = 109 at distance 1.
    for (name, r) in each(&[0, b'z', 0xE0, 100, 0], 110) {
        assert_eq!(r, Ok(vec![b'z'; 110]), "{name}");
    }
}

#[test]
fn round_trips_encoder_output() {
    let src = b"It was the best of times, it was the worst of times, ".repeat(40);
    let mut tokens = Vec::new();
    compress_block(&src, &mut MatchFinder::new(), &mut tokens);
    for (name, r) in each(&tokens, src.len()) {
        assert_eq!(r.as_ref(), Ok(&src), "{name}");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Hostile input
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn backreference_before_start() {
    for (name, r) in each(&[0x20, 0x00], 4) {
        assert_eq!(r, Err(LzfError::InvalidBackreference), "{name}");
    }
    for (name, r) in each(&[0, b'q', 0x20, 0x05], 4) {
        assert_eq!(r, Err(LzfError::InvalidBackreference), "{name}");
    }
}

#[test]
fn missing_offset_byte() {
    for (name, r) in each(&[0, b'q', 0x20], 4) {
        assert_eq!(r, Err(LzfError::MalformedChunk), "{name}");
    }
    for (name, r) in each(&[0, b'q', 0xE0], 40) {
        assert_eq!(r, Err(LzfError::MalformedChunk), "{name}");
    }
}

#[test]
fn literal_past_end_of_tokens() {
    for (name, r) in each(&[5, b'a', b'b'], 6) {
        assert_eq!(r, Err(LzfError::MalformedChunk), "{name}");
    }
}

#[test]
fn output_overrun() {
    for (name, r) in each(&[3, b'a', b'b', b'c', b'd'], 2) {
        assert_eq!(r, Err(LzfError::MalformedChunk), "{name}");
    }
    for (name, r) in each(&[0, b'a', 0x40, 0], 3) {
        assert_eq!(r, Err(LzfError::MalformedChunk), "{name}");
    }
}

#[test]
fn output_shortfall() {
    for (name, r) in each(&[1, b'a', b'b'], 3) {
        assert_eq!(r, Err(LzfError::MalformedChunk), "{name}");
    }
}

#[test]
fn failed_decode_leaves_prefix_untouched() {
    for &(name, f) in &DECODERS {
        let mut out = b"keep".to_vec();
        assert!(f(&[0x20, 0x00], &mut out, 10).is_err(), "{name}");
        assert_eq!(out, b"keep", "{name}");
    }
}
