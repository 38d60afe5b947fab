//! E2E Test Suite 04: Error Handling
//!
//! Corrupt and truncated streams must fail with the matching error kind
//! through every decoding surface: one-shot decode, the pull reader, and
//! the push decoder.  Misused adapters must refuse further work.

extern crate lzf;

use std::io::{self, Read, Write};

use lzf::chunk::{parse_header, HEADER_LEN_RAW};
use lzf::{decode, encode, LzfError, LzfReader, LzfWriter, ParallelLzfWriter, Uncompressor};

fn sample() -> Vec<u8> {
    b"error handling sample data, error handling sample data. ".repeat(100)
}

/// Decode `bad` through all three surfaces and return the three errors.
fn all_surfaces(bad: &[u8]) -> [Option<LzfError>; 3] {
    let one_shot = decode(bad).err();

    let mut sink = Vec::new();
    let pull = LzfReader::new(bad)
        .read_to_end(&mut sink)
        .err()
        .map(|e| LzfError::from_io(&e).expect("codec error"));

    let mut u = Uncompressor::new(Vec::new());
    let push = match u.feed(bad) {
        Err(e) => Some(e),
        Ok(()) => u.complete().err(),
    };
    [one_shot, pull, push]
}

// ─────────────────────────────────────────────────────────────────────────────
// Corruption detection
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_flipped_magic_is_malformed() {
    let mut bad = encode(&sample());
    bad[0] = b'z';
    assert_eq!(all_surfaces(&bad), [Some(LzfError::MalformedChunk); 3]);

    let mut bad = encode(&sample());
    bad[1] ^= 0xFF;
    assert_eq!(all_surfaces(&bad), [Some(LzfError::MalformedChunk); 3]);
}

#[test]
fn test_unknown_type_is_malformed() {
    let mut bad = encode(&sample());
    bad[2] = 2;
    assert_eq!(all_surfaces(&bad), [Some(LzfError::MalformedChunk); 3]);
}

#[test]
fn test_payload_short_by_one_is_truncated() {
    let good = encode(&sample());
    let bad = &good[..good.len() - 1];
    assert_eq!(all_surfaces(bad), [Some(LzfError::TruncatedInput); 3]);
}

#[test]
fn test_raw_payload_short_by_one_is_truncated() {
    let good = encode(b"raw chunk");
    assert_eq!(good.len(), HEADER_LEN_RAW + 9);
    assert_eq!(all_surfaces(&good[..good.len() - 1]), [Some(LzfError::TruncatedInput); 3]);
}

#[test]
fn test_short_tail_kind_agrees_across_surfaces() {
    let good = encode(b"a chunk followed by a stray tail");
    let tail = |t: &[u8]| [good.as_slice(), t].concat();
    assert_eq!(all_surfaces(&tail(b"Z")), [Some(LzfError::TruncatedInput); 3]);
    assert_eq!(all_surfaces(&tail(b"ZV")), [Some(LzfError::TruncatedInput); 3]);
    assert_eq!(all_surfaces(&tail(b"X")), [Some(LzfError::MalformedChunk); 3]);
    assert_eq!(all_surfaces(&tail(b"ZQ")), [Some(LzfError::MalformedChunk); 3]);
}

#[test]
fn test_offset_past_output_is_invalid_backreference() {
    // 2 literals then a 3-byte copy from 3 bytes back
    let bad = b"ZV\x01\x00\x05\x00\x05\x01ab\x20\x02";
    assert_eq!(all_surfaces(bad), [Some(LzfError::InvalidBackreference); 3]);
}

#[test]
fn test_length_mismatch_is_malformed() {
    // declares 6 bytes but the tokens produce 5
    let bad = b"ZV\x01\x00\x06\x00\x05\x01ab\x20\x01";
    assert_eq!(all_surfaces(bad), [Some(LzfError::MalformedChunk); 3]);
}

#[test]
fn test_error_in_second_chunk() {
    let good = encode(&vec![b'q'; 70_000]);
    let (first, _) = parse_header(&good, 0).unwrap();
    let mut bad = good[..first.chunk_len()].to_vec();
    // raw chunk declaring zero bytes
    bad.extend_from_slice(b"ZV\x00\x00\x00");
    assert_eq!(all_surfaces(&bad), [Some(LzfError::MalformedChunk); 3]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Adapter misuse
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_invalid_block_sizes() {
    for bad in [0usize, 65_536, usize::MAX] {
        assert_eq!(LzfWriter::new(Vec::new(), bad).err(), Some(LzfError::InvalidBlockSize(bad)));
        let err = ParallelLzfWriter::new(Vec::new(), bad, 2).err().expect("rejected");
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}

#[test]
fn test_closed_adapters_refuse_work() {
    let mut w = LzfWriter::new(Vec::new(), 100).unwrap();
    w.close().unwrap();
    assert_eq!(LzfError::from_io(&w.write(b"x").unwrap_err()), Some(LzfError::StreamClosed));
    assert_eq!(LzfError::from_io(&w.flush().unwrap_err()), Some(LzfError::StreamClosed));

    let mut p = ParallelLzfWriter::new(Vec::new(), 100, 2).unwrap();
    p.close().unwrap();
    assert_eq!(LzfError::from_io(&p.write(b"x").unwrap_err()), Some(LzfError::StreamClosed));

    let encoded = encode(b"reader");
    let mut r = LzfReader::new(encoded.as_slice());
    r.close();
    assert_eq!(LzfError::from_io(&r.read(&mut [0; 4]).unwrap_err()), Some(LzfError::StreamClosed));
}
