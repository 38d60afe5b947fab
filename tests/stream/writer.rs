// Integration tests for stream/writer.rs: chunk boundaries, flush, close.

use std::io::{self, Write};

use lzf::chunk::{parse_header, MAX_CHUNK_LEN};
use lzf::{decode, LzfError, LzfWriter, Strategy};

fn text(len: usize) -> Vec<u8> {
    b"Streams are chunked at a fixed block size. "
        .iter()
        .cycle()
        .take(len)
        .copied()
        .collect()
}

/// Original lengths of every chunk in `encoded`.
fn chunk_lengths(encoded: &[u8]) -> Vec<usize> {
    let mut lens = Vec::new();
    let mut off = 0;
    while off < encoded.len() {
        let (h, _) = parse_header(encoded, off).unwrap();
        lens.push(h.original_len);
        off += h.chunk_len();
    }
    lens
}

#[test]
fn chunk_boundaries_follow_block_size() {
    let input = text(2500);
    let mut w = LzfWriter::new(Vec::new(), 1000).unwrap();
    for piece in input.chunks(333) {
        w.write_all(piece).unwrap();
    }
    assert_eq!(w.chunks_written(), 2);
    let out = w.finish().unwrap();
    assert_eq!(chunk_lengths(&out), [1000, 1000, 500]);
    assert_eq!(decode(&out).unwrap(), input);
}

#[test]
fn flush_emits_a_short_chunk() {
    let mut w = LzfWriter::new(Vec::new(), 1000).unwrap();
    w.write_all(&text(300)).unwrap();
    assert!(w.get_ref().is_empty());
    w.flush().unwrap();
    assert_eq!(chunk_lengths(w.get_ref()), [300]);
    // Nothing pending: a second flush adds nothing.
    w.flush().unwrap();
    w.write_all(&text(10)).unwrap();
    let out = w.finish().unwrap();
    assert_eq!(chunk_lengths(&out), [300, 10]);
}

#[test]
fn default_block_size_is_the_chunk_ceiling() {
    let input = text(MAX_CHUNK_LEN * 2 + 1);
    let mut w = LzfWriter::new(Vec::new(), MAX_CHUNK_LEN).unwrap();
    w.write_all(&input).unwrap();
    let out = w.finish().unwrap();
    assert_eq!(chunk_lengths(&out), [MAX_CHUNK_LEN, MAX_CHUNK_LEN, 1]);
    assert_eq!(out, lzf::encode(&input));
}

#[test]
fn tail_after_full_chunk_is_written_once() {
    for (block_size, len) in [(MAX_CHUNK_LEN, MAX_CHUNK_LEN + 1), (4, 17), (1000, 1999)] {
        let input = text(len);
        let mut w = LzfWriter::new(Vec::new(), block_size).unwrap();
        let (head, tail) = input.split_at(len / 2);
        w.write_all(head).unwrap();
        w.write_all(tail).unwrap();
        let out = w.finish().unwrap();
        let mut expected = vec![block_size; len / block_size];
        expected.push(len % block_size);
        assert_eq!(chunk_lengths(&out), expected, "block {block_size}, len {len}");
        assert_eq!(decode(&out).unwrap(), input);
    }
}

#[test]
fn empty_stream_writes_nothing() {
    let w = LzfWriter::new(Vec::new(), 100).unwrap();
    assert!(w.finish().unwrap().is_empty());
}

#[test]
fn write_after_close_fails() {
    let mut w = LzfWriter::with_strategy(Vec::new(), 64, Strategy::Portable).unwrap();
    w.write_all(b"abc").unwrap();
    w.close().unwrap();
    assert!(w.is_closed());
    w.close().unwrap();
    let err = w.write(b"more").unwrap_err();
    assert_eq!(LzfError::from_io(&err), Some(LzfError::StreamClosed));
    assert_eq!(decode(w.get_ref()).unwrap(), b"abc");
}

struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn sink_errors_surface_and_close_still_closes() {
    let mut w = LzfWriter::new(BrokenPipe, 16).unwrap();
    w.write_all(b"short").unwrap();
    let err = w.close().unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    assert!(w.is_closed());
}
