//! E2E Test Suite 02: Strategy Equivalence
//!
//! The portable and optimized encoders must emit identical bytes for every
//! input, and the two decoders must agree on every output and on every
//! error.  Inputs cover text, noise, runs, periodic data at awkward
//! periods, and matches near the 8 KiB distance limit.

extern crate lzf;

use lzf::block::{decompress_block, decompress_block_fast};
use lzf::{decode_with, encode_with, LzfError, Strategy};

fn corpus() -> Vec<(String, Vec<u8>)> {
    let mut cases: Vec<(String, Vec<u8>)> = Vec::new();
    let mut x: u32 = 0xDEAD_BEEF;
    let mut rand = move || {
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        x
    };

    cases.push(("empty".into(), Vec::new()));
    cases.push(("one byte".into(), vec![1]));
    cases.push(("zeros".into(), vec![0; 100_000]));
    cases.push(("noise".into(), (0..100_000).map(|_| rand() as u8).collect()));
    for period in [2usize, 3, 7, 31, 33, 263, 265, 8191, 8193] {
        let unit: Vec<u8> = (0..period).map(|_| rand() as u8).collect();
        let data: Vec<u8> = unit.iter().cycle().take(period * 4 + 1000).copied().collect();
        cases.push((format!("period {period}"), data));
    }
    // sparse noise: short literal runs between matches
    let sparse: Vec<u8> = (0..80_000)
        .map(|i| if i % 40 < 3 { rand() as u8 } else { b'.' })
        .collect();
    cases.push(("sparse".into(), sparse));
    cases.push((
        "text".into(),
        b"To be, or not to be, that is the question: ".repeat(3000),
    ));
    cases
}

#[test]
fn test_encoders_are_byte_identical() {
    for (name, data) in corpus() {
        let p = encode_with(Strategy::Portable, &data);
        let o = encode_with(Strategy::Optimized, &data);
        assert_eq!(p, o, "{name}");
    }
}

#[test]
fn test_decoders_agree_on_valid_input() {
    for (name, data) in corpus() {
        let encoded = encode_with(Strategy::Portable, &data);
        for s in Strategy::ALL {
            assert_eq!(decode_with(s, &encoded).as_ref(), Ok(&data), "{name} / {s}");
        }
    }
}

/// Every single-byte corruption of a small stream must be treated the same
/// way by both decoders.
#[test]
fn test_decoders_agree_on_corrupt_input() {
    let encoded = encode_with(Strategy::Optimized, &b"abcabcabc-xyzxyzxyz-abcxyz".repeat(20));
    for i in 0..encoded.len() {
        for flip in [0x01u8, 0x20, 0x80, 0xFF] {
            let mut bad = encoded.clone();
            bad[i] ^= flip;
            let p = decode_with(Strategy::Portable, &bad);
            let o = decode_with(Strategy::Optimized, &bad);
            assert_eq!(p, o, "byte {i} ^ {flip:#04x}");
        }
    }
}

/// Same check one level down, on arbitrary token streams.
#[test]
fn test_block_decoders_agree_on_arbitrary_tokens() {
    let mut x: u32 = 12345;
    for _ in 0..2000 {
        x = x.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let len = (x >> 24) as usize % 24;
        let tokens: Vec<u8> = (0..len)
            .map(|_| {
                x = x.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                (x >> 16) as u8
            })
            .collect();
        let out_len = (x >> 8) as usize % 64;
        let mut a = Vec::new();
        let mut b = Vec::new();
        let ra: Result<(), LzfError> = decompress_block(&tokens, &mut a, out_len);
        let rb = decompress_block_fast(&tokens, &mut b, out_len);
        assert_eq!(ra, rb, "{tokens:?} -> {out_len}");
        assert_eq!(a, b);
    }
}
