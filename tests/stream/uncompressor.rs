// Integration tests for stream/uncompressor.rs: push decoding with custom
// handlers.

use lzf::{encode, DataHandler, LzfError, Uncompressor};

#[derive(Default)]
struct Recorder {
    pieces: Vec<usize>,
    total: Vec<u8>,
    finished: bool,
    stop_after: Option<usize>,
}

impl DataHandler for Recorder {
    fn handle_data(&mut self, data: &[u8]) -> bool {
        self.pieces.push(data.len());
        self.total.extend_from_slice(data);
        self.stop_after.map_or(true, |n| self.pieces.len() < n)
    }

    fn all_data_handled(&mut self) {
        self.finished = true;
    }
}

fn words(len: usize) -> Vec<u8> {
    b"alpha beta gamma delta ".iter().cycle().take(len).copied().collect()
}

#[test]
fn handler_sees_one_call_per_chunk() {
    let input = words(150_000);
    let encoded = encode(&input);
    let mut u = Uncompressor::new(Recorder::default());
    for piece in encoded.chunks(1000) {
        u.feed(piece).unwrap();
    }
    let rec = u.complete().unwrap();
    assert_eq!(rec.pieces, [65_535, 65_535, 150_000 - 2 * 65_535]);
    assert_eq!(rec.total, input);
    assert!(rec.finished);
}

#[test]
fn stop_ignores_remaining_input() {
    let encoded = encode(&words(200_000));
    let mut u = Uncompressor::new(Recorder { stop_after: Some(1), ..Recorder::default() });
    u.feed(&encoded).unwrap();
    assert!(u.is_stopped());
    u.feed(b"not even lzf").unwrap();
    let rec = u.complete().unwrap();
    assert_eq!(rec.pieces, [65_535]);
}

#[test]
fn split_header_is_reassembled() {
    let encoded = encode(&words(500));
    let mut u = Uncompressor::new(Vec::new());
    u.feed(&encoded[..1]).unwrap();
    u.feed(&encoded[1..4]).unwrap();
    u.feed(&encoded[4..]).unwrap();
    assert_eq!(u.complete().unwrap(), words(500));
}

#[test]
fn bad_type_tag_fails_on_feed() {
    let mut u = Uncompressor::new(Vec::new());
    assert_eq!(u.feed(b"ZV\x09"), Err(LzfError::MalformedChunk));
}

#[test]
fn corrupt_payload_fails_on_feed() {
    let mut u = Uncompressor::new(Vec::new());
    // compressed chunk of 8 bytes whose token is a backreference at offset 1
    // with nothing decoded yet.
    assert_eq!(
        u.feed(b"ZV\x01\x00\x08\x00\x02\x20\x00"),
        Err(LzfError::InvalidBackreference)
    );
}

#[test]
fn partial_chunk_at_complete() {
    let encoded = encode(&words(100));
    let mut u = Uncompressor::new(Vec::new());
    u.feed(&encoded[..encoded.len() - 3]).unwrap();
    assert_eq!(u.complete().err(), Some(LzfError::TruncatedInput));
}
