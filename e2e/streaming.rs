//! E2E Test Suite 03: Streaming Adapters
//!
//! Writer output decoded by the one-shot decoder, writer output drained by
//! the reader at odd read sizes, the push decoder fed at odd piece sizes,
//! and the parallel writer against the serial one.

extern crate lzf;

use std::io::{Read, Write};

use lzf::{decode, DataHandler, LzfReader, LzfWriter, ParallelLzfWriter, Strategy, Uncompressor};

fn data(len: usize) -> Vec<u8> {
    let mut x: u32 = 99;
    (0..len)
        .map(|i| {
            if i % 1024 < 700 {
                b"streaming "[i % 10]
            } else {
                x = x.wrapping_mul(69_069).wrapping_add(1);
                (x >> 24) as u8
            }
        })
        .collect()
}

fn write_through(input: &[u8], block_size: usize, piece: usize) -> Vec<u8> {
    let mut w = LzfWriter::new(Vec::new(), block_size).unwrap();
    for p in input.chunks(piece.max(1)) {
        w.write_all(p).unwrap();
    }
    w.finish().unwrap()
}

#[test]
fn test_writer_then_decode() {
    let input = data(100_000);
    for block_size in [1, 17, 1000, 8192, 65_535] {
        let input = if block_size == 1 { &input[..3000] } else { &input[..] };
        let encoded = write_through(input, block_size, 4097);
        assert_eq!(decode(&encoded).unwrap(), input, "block {block_size}");
    }
}

#[test]
fn test_writer_then_reader_odd_reads() {
    let input = data(150_000);
    let encoded = write_through(&input, 10_000, 333);
    for read_size in [1usize, 7, 4096, 70_000] {
        let mut r = LzfReader::with_strategy(encoded.as_slice(), Strategy::Portable);
        let mut out = Vec::new();
        let mut buf = vec![0u8; read_size];
        loop {
            let n = r.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            out.extend_from_slice(&buf[..n]);
        }
        assert_eq!(out, input, "read size {read_size}");
    }
}

struct Count(usize);

impl DataHandler for Count {
    fn handle_data(&mut self, data: &[u8]) -> bool {
        self.0 += data.len();
        true
    }
}

#[test]
fn test_push_decoder_odd_pieces() {
    let input = data(90_000);
    let encoded = write_through(&input, 3000, 1 << 20);
    for piece in [1usize, 2, 5, 6, 7, 8, 1000, 65_536] {
        let mut u = Uncompressor::new(Vec::new());
        for p in encoded.chunks(piece) {
            u.feed(p).unwrap();
        }
        assert_eq!(u.complete().unwrap(), input, "piece {piece}");
    }
    let mut u = Uncompressor::new(Count(0));
    u.feed(&encoded).unwrap();
    assert_eq!(u.complete().unwrap().0, input.len());
}

#[test]
fn test_parallel_writer_matches_serial() {
    let input = data(400_000);
    let serial = write_through(&input, 20_000, 12_345);
    let mut w = ParallelLzfWriter::new(Vec::new(), 20_000, 3).unwrap();
    for p in input.chunks(12_345) {
        w.write_all(p).unwrap();
    }
    assert_eq!(w.finish().unwrap(), serial);
}

#[test]
fn test_reader_over_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("stream.lzf");
    let input = data(77_777);
    {
        let f = std::fs::File::create(&path).unwrap();
        let mut w = LzfWriter::new(std::io::BufWriter::new(f), 65_535).unwrap();
        w.write_all(&input).unwrap();
        w.finish().unwrap().flush().unwrap();
    }
    let mut r = LzfReader::new(std::fs::File::open(&path).unwrap());
    let mut out = Vec::new();
    r.read_to_end(&mut out).unwrap();
    assert_eq!(out, input);
}
